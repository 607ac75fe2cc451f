//! Render primitives produced for a sheet.
//!
//! A [`Primitive`] is a single drawable element in canvas coordinates: its
//! [`Geometry`], an optional fill, an optional stroke, optional arrow markers,
//! and an optional centered [`TextLabel`]. Primitives are plain values and
//! never refer back into the document they were rendered from.

use crate::{
    color::Rgb8,
    draw::{ArrowKind, PathData, StrokeDefinition},
    geometry::{Point, Rect},
};

/// The outline of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Path(PathData),
    Polyline(Vec<Point>),
    Polygon(Vec<Point>),
    Ellipse { center: Point, rx: f64, ry: f64 },
    Rectangle { bounds: Rect, corner_radius: f64 },
}

impl Geometry {
    /// Returns the name of the geometry kind, matching its SVG element.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::Polyline(_) => "polyline",
            Self::Polygon(_) => "polygon",
            Self::Ellipse { .. } => "ellipse",
            Self::Rectangle { .. } => "rect",
        }
    }
}

/// A Unicode label centered on an anchor point.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    text: String,
    anchor: Point,
}

impl TextLabel {
    /// Creates a label centered within `bounds`.
    pub fn centered_in(text: impl Into<String>, bounds: Rect) -> Self {
        Self {
            text: text.into(),
            anchor: bounds.center(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the point the label is centered on.
    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

/// A single render primitive.
///
/// # Examples
///
/// ```
/// use graffle_core::color::Rgb8;
/// use graffle_core::draw::{Geometry, Primitive, StrokeDefinition};
/// use graffle_core::geometry::Point;
///
/// let line = Primitive::new(Geometry::Polyline(vec![
///     Point::new(0.0, 0.0),
///     Point::new(100.0, 100.0),
/// ]))
/// .with_stroke(Some(StrokeDefinition::default()));
///
/// assert_eq!(line.fill(), None);
/// assert_eq!(line.stroke().map(|s| s.color()), Some(Rgb8::BLACK));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    geometry: Geometry,
    fill: Option<Rgb8>,
    stroke: Option<StrokeDefinition>,
    head_marker: Option<ArrowKind>,
    tail_marker: Option<ArrowKind>,
    label: Option<TextLabel>,
}

impl Primitive {
    /// Creates an unpainted primitive for the given geometry.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            fill: None,
            stroke: None,
            head_marker: None,
            tail_marker: None,
            label: None,
        }
    }

    pub fn with_fill(mut self, fill: Option<Rgb8>) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_stroke(mut self, stroke: Option<StrokeDefinition>) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_markers(mut self, head: Option<ArrowKind>, tail: Option<ArrowKind>) -> Self {
        self.head_marker = head;
        self.tail_marker = tail;
        self
    }

    pub fn with_label(mut self, label: Option<TextLabel>) -> Self {
        self.label = label;
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the fill color; `None` means no fill is painted.
    pub fn fill(&self) -> Option<Rgb8> {
        self.fill
    }

    /// Returns the stroke; `None` means no outline is painted.
    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    /// Returns the arrow drawn at the end of the stroke.
    pub fn head_marker(&self) -> Option<ArrowKind> {
        self.head_marker
    }

    /// Returns the arrow drawn at the start of the stroke.
    pub fn tail_marker(&self) -> Option<ArrowKind> {
        self.tail_marker
    }

    pub fn label(&self) -> Option<&TextLabel> {
        self.label.as_ref()
    }
}
