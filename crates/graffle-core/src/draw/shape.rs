//! Shape kinds and their vector geometry.
//!
//! [`ShapeKind::geometry`] turns a shape kind and its bounds into the
//! [`Geometry`] the renderer paints. Polygonal kinds are described by their
//! vertices in clockwise order starting at the top-most (or top-left) vertex;
//! `vflip` rotates those vertices 180° about the center of the bounds.
//! Ellipses, rectangles, and exported shapes ignore `vflip`.

use log::trace;

use crate::{
    document::ExportShape,
    draw::{Geometry, PathData},
    error::{Error, Result},
    geometry::{Point, Rect},
};

/// Fractional vertex offsets of the pentagon, relative to its bounds.
const PENTAGON: [(f64, f64); 5] = [
    (0.5, 0.0),
    (1.0, 0.4),
    (0.8, 1.0),
    (0.2, 1.0),
    (0.0, 0.4),
];

/// Fractional vertex offsets of the octagon, relative to its bounds.
const OCTAGON: [(f64, f64); 8] = [
    (2.0 / 3.0, 0.0),
    (1.0, 1.0 / 3.0),
    (1.0, 2.0 / 3.0),
    (2.0 / 3.0, 1.0),
    (1.0 / 3.0, 1.0),
    (0.0, 2.0 / 3.0),
    (0.0, 1.0 / 3.0),
    (1.0 / 3.0, 0.0),
];

/// The supported shapes of a shaped graphic.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Circle,
    Diamond,
    VerticalTriangle,
    HorizontalTriangle,
    RightTriangle,
    Pentagon,
    Octagon,
    /// A right-pointing arrow. `ratio` is the shaft height as a fraction of
    /// the bounds height; `shaft_width` is the length of the head.
    AdjustableArrow {
        ratio: f64,
        shaft_width: f64,
    },
    /// An arrow with heads at both ends, each `shaft_width` long.
    AdjustableDoubleArrow {
        ratio: f64,
        shaft_width: f64,
    },
    /// A custom outline defined by the owning sheet's export shapes.
    ExportedShape {
        id: String,
    },
    PlainRectangle,
}

impl ShapeKind {
    /// Returns the polygon vertices for polygonal kinds, before any flip.
    ///
    /// Returns `None` for ellipses, rectangles, and exported shapes.
    ///
    /// # Examples
    ///
    /// ```
    /// use graffle_core::draw::ShapeKind;
    /// use graffle_core::geometry::{Point, Rect};
    ///
    /// let vertices = ShapeKind::Diamond
    ///     .polygon_vertices(Rect::new(0.0, 0.0, 100.0, 50.0))
    ///     .unwrap();
    /// assert_eq!(
    ///     vertices,
    ///     vec![
    ///         Point::new(50.0, 0.0),
    ///         Point::new(100.0, 25.0),
    ///         Point::new(50.0, 50.0),
    ///         Point::new(0.0, 25.0),
    ///     ]
    /// );
    /// ```
    pub fn polygon_vertices(&self, bounds: Rect) -> Option<Vec<Point>> {
        let vertices = match self {
            Self::Diamond => fractional(
                bounds,
                &[(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)],
            ),
            Self::VerticalTriangle => fractional(bounds, &[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]),
            Self::HorizontalTriangle => fractional(bounds, &[(0.0, 0.0), (1.0, 0.5), (0.0, 1.0)]),
            Self::RightTriangle => fractional(bounds, &[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            Self::Pentagon => fractional(bounds, &PENTAGON),
            Self::Octagon => fractional(bounds, &OCTAGON),
            Self::AdjustableArrow { ratio, shaft_width } => {
                single_arrow(bounds, *ratio, *shaft_width)
            }
            Self::AdjustableDoubleArrow { ratio, shaft_width } => {
                double_arrow(bounds, *ratio, *shaft_width)
            }
            Self::Circle | Self::ExportedShape { .. } | Self::PlainRectangle => return None,
        };
        Some(vertices)
    }

    /// Computes the geometry of this shape within `bounds`.
    ///
    /// Most kinds yield a single geometry. An exported shape yields its
    /// stroke path followed by a rectangle at `bounds`; both are painted.
    ///
    /// # Arguments
    ///
    /// * `bounds` - The graphic bounds in canvas coordinates.
    /// * `corner_radius` - Corner radius for rectangles.
    /// * `vflip` - Rotate polygonal shapes 180° about the bounds center.
    /// * `export_shapes` - The owning sheet's export shapes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExportShapeNotFound`] when an exported shape id is not
    /// defined on the sheet.
    pub fn geometry(
        &self,
        bounds: Rect,
        corner_radius: f64,
        vflip: bool,
        export_shapes: &[ExportShape],
    ) -> Result<Vec<Geometry>> {
        if let Some(mut vertices) = self.polygon_vertices(bounds) {
            if vflip {
                let center = bounds.center();
                vertices = vertices
                    .into_iter()
                    .map(|vertex| vertex.rotate_half_turn(center))
                    .collect();
            }
            return Ok(vec![Geometry::Polygon(vertices)]);
        }

        let rectangle = Geometry::Rectangle {
            bounds,
            corner_radius,
        };

        match self {
            Self::Circle => Ok(vec![Geometry::Ellipse {
                center: bounds.center(),
                rx: bounds.width() / 2.0,
                ry: bounds.height() / 2.0,
            }]),
            Self::ExportedShape { id } => {
                let shape = export_shapes
                    .iter()
                    .find(|shape| shape.id() == id)
                    .ok_or_else(|| Error::ExportShapeNotFound(id.clone()))?;
                trace!(id:?; "Resolved export shape");
                Ok(vec![Geometry::Path(shape.path_in(bounds)), rectangle])
            }
            _ => Ok(vec![rectangle]),
        }
    }
}

/// Maps fractional offsets to points within `bounds`.
fn fractional(bounds: Rect, offsets: &[(f64, f64)]) -> Vec<Point> {
    offsets
        .iter()
        .map(|&(fx, fy)| bounds.at_fraction(fx, fy))
        .collect()
}

/// The seven vertices of a right-pointing single-headed arrow.
fn single_arrow(bounds: Rect, ratio: f64, shaft_width: f64) -> Vec<Point> {
    let head = shaft_width.max(0.0).min(bounds.width());
    let neck_x = bounds.max_x() - head;
    let (shaft_top, shaft_bottom) = shaft_span(bounds, ratio);
    let mid_y = bounds.center().y();

    vec![
        Point::new(bounds.x(), shaft_top),
        Point::new(neck_x, shaft_top),
        Point::new(neck_x, bounds.y()),
        Point::new(bounds.max_x(), mid_y),
        Point::new(neck_x, bounds.max_y()),
        Point::new(neck_x, shaft_bottom),
        Point::new(bounds.x(), shaft_bottom),
    ]
}

/// The ten vertices of an arrow with heads at both ends.
fn double_arrow(bounds: Rect, ratio: f64, shaft_width: f64) -> Vec<Point> {
    let head = shaft_width.max(0.0).min(bounds.width() / 2.0);
    let left_neck = bounds.x() + head;
    let right_neck = bounds.max_x() - head;
    let (shaft_top, shaft_bottom) = shaft_span(bounds, ratio);
    let mid_y = bounds.center().y();

    vec![
        Point::new(bounds.x(), mid_y),
        Point::new(left_neck, bounds.y()),
        Point::new(left_neck, shaft_top),
        Point::new(right_neck, shaft_top),
        Point::new(right_neck, bounds.y()),
        Point::new(bounds.max_x(), mid_y),
        Point::new(right_neck, bounds.max_y()),
        Point::new(right_neck, shaft_bottom),
        Point::new(left_neck, shaft_bottom),
        Point::new(left_neck, bounds.max_y()),
    ]
}

/// Top and bottom y of a shaft `h * ratio` tall, centered vertically.
fn shaft_span(bounds: Rect, ratio: f64) -> (f64, f64) {
    let half_shaft = bounds.height() * ratio / 2.0;
    let mid_y = bounds.center().y();
    (mid_y - half_shaft, mid_y + half_shaft)
}

/// Maps a point from unit space, centered on the origin, into `bounds`.
fn unit_to_bounds(bounds: Rect) -> impl Fn(Point) -> Point {
    let center = bounds.center();
    move |p: Point| {
        Point::new(
            bounds.width().mul_add(p.x(), center.x()),
            bounds.height().mul_add(p.y(), center.y()),
        )
    }
}

impl ExportShape {
    /// Returns the stroke path mapped from unit space into `bounds`.
    pub fn path_in(&self, bounds: Rect) -> PathData {
        let map = unit_to_bounds(bounds);
        self.stroke_path()
            .iter()
            .map(|op| op.map_points(&map))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::PathOp;

    fn assert_points_eq(actual: &[Point], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "vertex count: {actual:?}");
        for (point, &(x, y)) in actual.iter().zip(expected) {
            assert_approx_eq!(f64, point.x(), x, epsilon = 1e-9);
            assert_approx_eq!(f64, point.y(), y, epsilon = 1e-9);
        }
    }

    fn polygon(kind: &ShapeKind, bounds: Rect, vflip: bool) -> Vec<Point> {
        match kind.geometry(bounds, 0.0, vflip, &[]).unwrap().as_slice() {
            [Geometry::Polygon(vertices)] => vertices.clone(),
            other => panic!("expected a single polygon, got {other:?}"),
        }
    }

    #[test]
    fn test_diamond() {
        let vertices = polygon(&ShapeKind::Diamond, Rect::new(0.0, 0.0, 100.0, 50.0), false);
        assert_points_eq(
            &vertices,
            &[(50.0, 0.0), (100.0, 25.0), (50.0, 50.0), (0.0, 25.0)],
        );
    }

    #[test]
    fn test_triangles() {
        let bounds = Rect::new(10.0, 20.0, 40.0, 30.0);

        assert_points_eq(
            &polygon(&ShapeKind::VerticalTriangle, bounds, false),
            &[(10.0, 20.0), (50.0, 20.0), (30.0, 50.0)],
        );
        assert_points_eq(
            &polygon(&ShapeKind::HorizontalTriangle, bounds, false),
            &[(10.0, 20.0), (50.0, 35.0), (10.0, 50.0)],
        );
        assert_points_eq(
            &polygon(&ShapeKind::RightTriangle, bounds, false),
            &[(10.0, 20.0), (50.0, 50.0), (10.0, 50.0)],
        );
    }

    #[test]
    fn test_pentagon() {
        let vertices = polygon(&ShapeKind::Pentagon, Rect::new(0.0, 0.0, 100.0, 100.0), false);
        assert_points_eq(
            &vertices,
            &[(50.0, 0.0), (100.0, 40.0), (80.0, 100.0), (20.0, 100.0), (0.0, 40.0)],
        );
    }

    #[test]
    fn test_octagon() {
        let vertices = polygon(&ShapeKind::Octagon, Rect::new(0.0, 0.0, 90.0, 30.0), false);
        assert_points_eq(
            &vertices,
            &[
                (60.0, 0.0),
                (90.0, 10.0),
                (90.0, 20.0),
                (60.0, 30.0),
                (30.0, 30.0),
                (0.0, 20.0),
                (0.0, 10.0),
                (30.0, 0.0),
            ],
        );
    }

    #[test]
    fn test_adjustable_arrow() {
        let kind = ShapeKind::AdjustableArrow {
            ratio: 0.5,
            shaft_width: 20.0,
        };
        let vertices = polygon(&kind, Rect::new(0.0, 0.0, 100.0, 40.0), false);

        assert_points_eq(
            &vertices,
            &[
                (0.0, 10.0),
                (80.0, 10.0),
                (80.0, 0.0),
                (100.0, 20.0),
                (80.0, 40.0),
                (80.0, 30.0),
                (0.0, 30.0),
            ],
        );
    }

    #[test]
    fn test_adjustable_double_arrow() {
        let kind = ShapeKind::AdjustableDoubleArrow {
            ratio: 0.5,
            shaft_width: 20.0,
        };
        let vertices = polygon(&kind, Rect::new(0.0, 0.0, 100.0, 40.0), false);

        assert_points_eq(
            &vertices,
            &[
                (0.0, 20.0),
                (20.0, 0.0),
                (20.0, 10.0),
                (80.0, 10.0),
                (80.0, 0.0),
                (100.0, 20.0),
                (80.0, 40.0),
                (80.0, 30.0),
                (20.0, 30.0),
                (20.0, 40.0),
            ],
        );
    }

    #[test]
    fn test_arrow_head_is_clamped_to_bounds() {
        let kind = ShapeKind::AdjustableDoubleArrow {
            ratio: 0.5,
            shaft_width: 500.0,
        };
        let vertices = polygon(&kind, Rect::new(0.0, 0.0, 100.0, 40.0), false);

        // Both necks meet in the middle.
        assert_approx_eq!(f64, vertices[1].x(), 50.0);
        assert_approx_eq!(f64, vertices[3].x(), 50.0);
    }

    #[test]
    fn test_vflip_rotates_about_center() {
        let bounds = Rect::new(0.0, 0.0, 40.0, 30.0);
        let vertices = polygon(&ShapeKind::VerticalTriangle, bounds, true);

        assert_points_eq(&vertices, &[(40.0, 30.0), (0.0, 30.0), (20.0, 0.0)]);
    }

    #[test]
    fn test_circle() {
        let geometry = ShapeKind::Circle
            .geometry(Rect::new(10.0, 10.0, 80.0, 40.0), 0.0, true, &[])
            .unwrap();

        assert_eq!(
            geometry,
            vec![Geometry::Ellipse {
                center: Point::new(50.0, 30.0),
                rx: 40.0,
                ry: 20.0,
            }]
        );
    }

    #[test]
    fn test_plain_rectangle_keeps_corner_radius() {
        let bounds = Rect::new(1.0, 2.0, 3.0, 4.0);
        let geometry = ShapeKind::PlainRectangle
            .geometry(bounds, 5.0, true, &[])
            .unwrap();

        assert_eq!(
            geometry,
            vec![Geometry::Rectangle {
                bounds,
                corner_radius: 5.0,
            }]
        );
    }

    #[test]
    fn test_exported_shape_emits_path_and_rectangle() {
        let id = "6D5E3A21-0B4C-4F55-9E7A-1C2D3E4F5A6B".to_string();
        let export = ExportShape::new(
            id.clone(),
            vec![
                PathOp::MoveTo(Point::new(-0.5, -0.5)),
                PathOp::LineTo(Point::new(0.5, 0.5)),
                PathOp::Close,
            ],
        );
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);

        let geometry = ShapeKind::ExportedShape { id }
            .geometry(bounds, 3.0, false, &[export])
            .unwrap();

        assert_eq!(geometry.len(), 2);
        match &geometry[0] {
            Geometry::Path(path) => assert_eq!(path.to_string(), "M0 0 L100 50 Z"),
            other => panic!("expected path, got {other:?}"),
        }
        assert_eq!(
            geometry[1],
            Geometry::Rectangle {
                bounds,
                corner_radius: 3.0,
            }
        );
    }

    #[test]
    fn test_exported_shape_not_found() {
        let result = ShapeKind::ExportedShape {
            id: "missing".to_string(),
        }
        .geometry(Rect::new(0.0, 0.0, 1.0, 1.0), 0.0, false, &[]);

        assert_eq!(
            result,
            Err(Error::ExportShapeNotFound("missing".to_string()))
        );
    }
}
