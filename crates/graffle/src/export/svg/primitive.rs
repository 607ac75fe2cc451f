//! SVG elements for render primitives.

use svg::node::{Node, element as svg_element};

use graffle_core::{
    apply_stroke,
    draw::{Geometry, Primitive, TextLabel},
    geometry::Point,
};

use super::{Svg, markers::marker_url};

/// Apply the fill, stroke, and markers of a primitive to an SVG element.
macro_rules! apply_paint {
    ($element:expr, $primitive:expr) => {{
        let fill = $primitive
            .fill()
            .map_or_else(|| "none".to_string(), |color| color.to_string());
        let elem = $element.set("fill", fill);

        let mut elem = match $primitive.stroke() {
            Some(stroke) => apply_stroke!(elem, stroke),
            None => elem.set("stroke", "none"),
        };

        if let Some(kind) = $primitive.head_marker() {
            elem = elem.set("marker-end", marker_url(&kind.head_marker_id()));
        }
        if let Some(kind) = $primitive.tail_marker() {
            elem = elem.set("marker-start", marker_url(&kind.tail_marker_id()));
        }

        elem
    }};
}

impl Svg {
    /// Returns the element of a primitive, followed by its label if any.
    pub(super) fn render_primitive(&self, primitive: &Primitive) -> Vec<Box<dyn Node>> {
        let element: Box<dyn Node> = match primitive.geometry() {
            Geometry::Path(path) => Box::new(apply_paint!(
                svg_element::Path::new().set("d", path.to_string()),
                primitive
            )),
            Geometry::Polyline(points) => Box::new(apply_paint!(
                svg_element::Polyline::new().set("points", points_attr(points)),
                primitive
            )),
            Geometry::Polygon(points) => Box::new(apply_paint!(
                svg_element::Polygon::new().set("points", points_attr(points)),
                primitive
            )),
            Geometry::Ellipse { center, rx, ry } => Box::new(apply_paint!(
                svg_element::Ellipse::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("rx", *rx)
                    .set("ry", *ry),
                primitive
            )),
            Geometry::Rectangle {
                bounds,
                corner_radius,
            } => {
                let mut rect = svg_element::Rectangle::new()
                    .set("x", bounds.x())
                    .set("y", bounds.y())
                    .set("width", bounds.width())
                    .set("height", bounds.height());
                if *corner_radius > 0.0 {
                    rect = rect.set("rx", *corner_radius).set("ry", *corner_radius);
                }
                Box::new(apply_paint!(rect, primitive))
            }
        };

        let mut nodes = vec![element];
        if let Some(label) = primitive.label() {
            nodes.push(Box::new(self.render_label(label)));
        }
        nodes
    }

    /// Renders a label centered on its anchor.
    ///
    /// Resolved rich text is a single fragment, so a label is one line.
    fn render_label(&self, label: &TextLabel) -> svg_element::Text {
        let anchor = label.anchor();

        svg_element::Text::new(label.text())
            .set("x", anchor.x())
            .set("y", anchor.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(" ")
}
