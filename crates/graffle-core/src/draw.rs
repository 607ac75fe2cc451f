//! Drawable Definitions for Sheet Rendering
//!
//! This module provides the visual building blocks the renderer works with:
//! stroke definitions and dash patterns, arrow markers, the geometry of every
//! supported shape kind, and the [`Primitive`] values a rendered sheet is made
//! of.
mod arrow;
mod path;
mod primitive;
mod shape;
mod stroke;

pub use arrow::{ArrowKind, MarkerDefinition, MarkerEnd};
pub use path::{PathData, PathOp};
pub use primitive::{Geometry, Primitive, TextLabel};
pub use shape::ShapeKind;
pub use stroke::{DashPattern, PatternCode, StrokeDefinition};
