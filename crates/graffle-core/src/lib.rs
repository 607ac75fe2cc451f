//! Graffle Core Types and Definitions
//!
//! This crate provides the foundational types shared by the graffle decoding
//! and rendering pipeline. It includes:
//!
//! - **Geometry**: Points, sizes, and rectangles in canvas space ([`geometry`] module)
//! - **Colors**: Document color records and their 8-bit resolution ([`color::Color`])
//! - **Draw**: Strokes, dash patterns, arrow markers, shape geometry, and
//!   render primitives ([`draw`] module)
//! - **Document**: The typed, immutable document model ([`document`] module)
//! - **Errors**: The domain error taxonomy ([`error::Error`])

pub mod color;
pub mod document;
pub mod draw;
pub mod error;
pub mod geometry;
