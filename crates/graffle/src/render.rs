//! Graphic tree rendering.
//!
//! Rendering turns one [`Sheet`] into a [`RenderedSheet`]: the canvas, the
//! full arrow marker table, and a flat, ordered list of [`Primitive`]s in
//! canvas coordinates. Groups are expanded depth-first with their children
//! kept in order, so the primitive order is the paint order.
//!
//! Rendering is strict: the first unsupported graphic aborts the whole call.

use log::{debug, info, trace};

use graffle_core::{
    document::{
        Document, ExportShape, Graphic, LineGraphic, LinePath, MAX_GROUP_DEPTH, ShapedGraphic,
        Sheet,
    },
    draw::{Geometry, MarkerDefinition, PathData, Primitive, TextLabel},
    error::{Error, Result},
    geometry::{Point, Size},
};
use graffle_parser::rtf;

/// A sheet rendered to primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSheet {
    title: String,
    origin: Point,
    size: Size,
    markers: Vec<MarkerDefinition>,
    primitives: Vec<Primitive>,
}

impl RenderedSheet {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the top-left corner of the canvas.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the marker definitions emitted ahead of the primitives.
    pub fn markers(&self) -> &[MarkerDefinition] {
        &self.markers
    }

    /// Returns the primitives in paint order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

/// Renders one sheet.
///
/// # Errors
///
/// Fails on groups nested deeper than [`MAX_GROUP_DEPTH`], unknown export
/// shape ids, and text that cannot be decoded.
pub fn render_sheet(sheet: &Sheet) -> Result<RenderedSheet> {
    let mut primitives = Vec::new();
    for graphic in sheet.graphics() {
        render_graphic(graphic, sheet.export_shapes(), 0, &mut primitives)?;
    }

    debug!(
        title = sheet.title(),
        primitives = primitives.len();
        "Sheet rendered"
    );

    Ok(RenderedSheet {
        title: sheet.title().to_string(),
        origin: sheet.origin(),
        size: sheet.size(),
        markers: MarkerDefinition::all(),
        primitives,
    })
}

/// Renders every sheet in order, stopping at the first failure.
pub fn render_document(document: &Document) -> Result<Vec<RenderedSheet>> {
    info!(sheets = document.sheets().len(); "Rendering document");
    document.sheets().iter().map(render_sheet).collect()
}

fn render_graphic(
    graphic: &Graphic,
    export_shapes: &[ExportShape],
    depth: usize,
    out: &mut Vec<Primitive>,
) -> Result<()> {
    match graphic {
        Graphic::Line(line) => {
            out.push(render_line(line));
            Ok(())
        }
        Graphic::Shaped(shaped) => {
            out.extend(render_shaped(shaped, export_shapes)?);
            Ok(())
        }
        Graphic::Group(children) => {
            if depth >= MAX_GROUP_DEPTH {
                return Err(Error::UnsupportedGraphic(format!(
                    "groups nested deeper than {MAX_GROUP_DEPTH} levels"
                )));
            }
            trace!(depth, children = children.len(); "Expanding group");
            children
                .iter()
                .try_for_each(|child| render_graphic(child, export_shapes, depth + 1, out))
        }
    }
}

/// Lines are stroked only, with black 1px as the default stroke.
fn render_line(line: &LineGraphic) -> Primitive {
    let geometry = match line.path() {
        LinePath::Points(points) => Geometry::Polyline(points.clone()),
        LinePath::Logical(ops) => Geometry::Path(PathData::new(ops.clone())),
    };
    let (head, tail) = line.style().arrows();

    Primitive::new(geometry)
        .with_stroke(line.style().stroke_definition())
        .with_markers(head, tail)
}

fn render_shaped(shaped: &ShapedGraphic, export_shapes: &[ExportShape]) -> Result<Vec<Primitive>> {
    let style = shaped.style();
    let geometries = shaped.kind().geometry(
        shaped.bounds(),
        style.corner_radius(),
        shaped.vflip(),
        export_shapes,
    )?;

    let label = match shaped.text() {
        Some(text) => {
            let content = rtf::resolve_text(text.raw(), text.encoding())?;
            (!content.is_empty()).then(|| TextLabel::centered_in(content, shaped.bounds()))
        }
        None => None,
    };

    let fill = style.fill_color();
    let stroke = style.stroke_definition();
    let last = geometries.len().saturating_sub(1);

    // The label travels with the topmost primitive of the graphic.
    let mut label = label;
    Ok(geometries
        .into_iter()
        .enumerate()
        .map(|(idx, geometry)| {
            let primitive = Primitive::new(geometry).with_fill(fill).with_stroke(stroke);
            if idx == last {
                primitive.with_label(label.take())
            } else {
                primitive
            }
        })
        .collect())
}
