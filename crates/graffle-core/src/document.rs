//! The typed document model.
//!
//! A [`Document`] is built once from a container's structured payload and is
//! immutable afterwards. Rendering reads it and produces independent
//! primitives; nothing in this module is mutated after construction.
//!
//! # Overview
//!
//! - [`Document`] - Ordered sheets plus an optional [`Preview`] image
//! - [`Sheet`] - One canvas: title, origin, size, graphics, export shapes
//! - [`Graphic`] - A line, a shaped graphic, or a group of graphics
//! - [`Style`] - Fill and stroke records, with their default policy

use crate::{
    color::{Color, Rgb8},
    draw::{ArrowKind, DashPattern, PathOp, PatternCode, ShapeKind, StrokeDefinition},
    geometry::{Point, Rect, Size},
};

/// Maximum nesting depth of groups, in both the builder and the renderer.
pub const MAX_GROUP_DEPTH: usize = 64;

/// Canvas origin used when a sheet does not declare one.
pub const DEFAULT_CANVAS_ORIGIN: Point = Point::new(0.0, 0.0);

/// Canvas size used when a sheet does not declare one.
pub const DEFAULT_CANVAS_SIZE: Size = Size::new(500.0, 500.0);

/// An embedded preview image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    data: Vec<u8>,
    media_type: String,
}

impl Preview {
    pub fn new(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
        }
    }

    /// Returns the raw image bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the media subtype, e.g. `"jpeg"`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }
}

/// A decoded diagram document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    sheets: Vec<Sheet>,
    preview: Option<Preview>,
}

impl Document {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self {
            sheets,
            preview: None,
        }
    }

    /// Returns the document with the given preview image attached.
    pub fn with_preview(mut self, preview: Option<Preview>) -> Self {
        self.preview = preview;
        self
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }
}

/// One canvas of a document.
///
/// Graphics are stored in paint order: later entries draw on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    title: String,
    origin: Option<Point>,
    size: Option<Size>,
    graphics: Vec<Graphic>,
    export_shapes: Vec<ExportShape>,
}

impl Sheet {
    pub fn new(title: impl Into<String>, graphics: Vec<Graphic>) -> Self {
        Self {
            title: title.into(),
            origin: None,
            size: None,
            graphics,
            export_shapes: Vec::new(),
        }
    }

    pub fn with_canvas(mut self, origin: Option<Point>, size: Option<Size>) -> Self {
        self.origin = origin;
        self.size = size;
        self
    }

    pub fn with_export_shapes(mut self, export_shapes: Vec<ExportShape>) -> Self {
        self.export_shapes = export_shapes;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the canvas origin, defaulting to `(0, 0)`.
    pub fn origin(&self) -> Point {
        self.origin.unwrap_or(DEFAULT_CANVAS_ORIGIN)
    }

    /// Returns the canvas size, defaulting to `500×500`.
    pub fn size(&self) -> Size {
        self.size.unwrap_or(DEFAULT_CANVAS_SIZE)
    }

    pub fn graphics(&self) -> &[Graphic] {
        &self.graphics
    }

    pub fn export_shapes(&self) -> &[ExportShape] {
        &self.export_shapes
    }
}

/// A custom outline defined once per sheet and referenced by id.
///
/// The stroke path is stored in unit space centered on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportShape {
    id: String,
    stroke_path: Vec<PathOp>,
}

impl ExportShape {
    pub fn new(id: impl Into<String>, stroke_path: Vec<PathOp>) -> Self {
        Self {
            id: id.into(),
            stroke_path,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stroke_path(&self) -> &[PathOp] {
        &self.stroke_path
    }
}

/// A drawable element of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Graphic {
    Line(LineGraphic),
    Shaped(ShapedGraphic),
    Group(Vec<Graphic>),
}

/// The course of a line: either plain points or a logical path, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum LinePath {
    Points(Vec<Point>),
    Logical(Vec<PathOp>),
}

/// A line graphic.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGraphic {
    path: LinePath,
    style: Style,
}

impl LineGraphic {
    pub fn new(path: LinePath, style: Style) -> Self {
        Self { path, style }
    }

    pub fn path(&self) -> &LinePath {
        &self.path
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// A graphic drawn as one of the supported shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedGraphic {
    kind: ShapeKind,
    bounds: Rect,
    style: Style,
    text: Option<RichText>,
    vflip: bool,
}

impl ShapedGraphic {
    pub fn new(kind: ShapeKind, bounds: Rect, style: Style) -> Self {
        Self {
            kind,
            bounds,
            style,
            text: None,
            vflip: false,
        }
    }

    pub fn with_text(mut self, text: Option<RichText>) -> Self {
        self.text = text;
        self
    }

    pub fn with_vflip(mut self, vflip: bool) -> Self {
        self.vflip = vflip;
        self
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn text(&self) -> Option<&RichText> {
        self.text.as_ref()
    }

    pub fn vflip(&self) -> bool {
        self.vflip
    }
}

/// An embedded rich-text run, kept escaped until rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    raw: String,
    encoding: String,
}

impl RichText {
    /// Creates a run from its raw payload and the legacy encoding label its
    /// bytes are decoded with.
    pub fn new(raw: impl Into<String>, encoding: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            encoding: encoding.into(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }
}

/// A fill paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    color: Color,
}

impl Paint {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// The authoring default fill of shaped graphics.
    pub fn white() -> Self {
        Self::new(Color::RgbByte {
            r: 255,
            g: 255,
            b: 255,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// A stroke record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Option<Color>,
    pub width: f64,
    pub drawn: bool,
    pub pattern: Option<PatternCode>,
    pub head_arrow: Option<ArrowKind>,
    pub tail_arrow: Option<ArrowKind>,
    pub corner_radius: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: None,
            width: 1.0,
            drawn: true,
            pattern: None,
            head_arrow: None,
            tail_arrow: None,
            corner_radius: 0.0,
        }
    }
}

/// Fill and stroke of a graphic.
///
/// A missing stroke record means the default stroke (black, width 1, solid).
/// A missing fill means no fill; the builder supplies the white default for
/// shaped graphics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    fill: Option<Paint>,
    stroke: Option<Stroke>,
}

impl Style {
    pub fn new(fill: Option<Paint>, stroke: Option<Stroke>) -> Self {
        Self { fill, stroke }
    }

    pub fn fill(&self) -> Option<&Paint> {
        self.fill.as_ref()
    }

    pub fn stroke(&self) -> Option<&Stroke> {
        self.stroke.as_ref()
    }

    /// Returns the resolved fill color, or `None` when nothing is filled.
    pub fn fill_color(&self) -> Option<Rgb8> {
        self.fill.map(|paint| paint.color().to_rgb8())
    }

    /// Returns the resolved stroke, or `None` when the stroke is not drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use graffle_core::color::Rgb8;
    /// use graffle_core::document::Style;
    ///
    /// let stroke = Style::default().stroke_definition().unwrap();
    /// assert_eq!(stroke.color(), Rgb8::BLACK);
    /// assert_eq!(stroke.width(), 1.0);
    /// ```
    pub fn stroke_definition(&self) -> Option<StrokeDefinition> {
        let stroke = self.stroke.unwrap_or_default();
        if !stroke.drawn {
            return None;
        }

        let color = stroke.color.map_or(Rgb8::BLACK, Color::to_rgb8);
        Some(
            StrokeDefinition::new(color, stroke.width)
                .with_dash(DashPattern::from_code(stroke.pattern)),
        )
    }

    /// Returns the head and tail arrows.
    pub fn arrows(&self) -> (Option<ArrowKind>, Option<ArrowKind>) {
        self.stroke
            .map_or((None, None), |stroke| (stroke.head_arrow, stroke.tail_arrow))
    }

    /// Returns the corner radius for rectangles, defaulting to `0`.
    pub fn corner_radius(&self) -> f64 {
        self.stroke.map_or(0.0, |stroke| stroke.corner_radius)
    }
}
