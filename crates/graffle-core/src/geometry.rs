//! Geometric primitives for canvas positioning.
//!
//! This module provides the geometric types shared by the document model and
//! the renderer.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - An axis-aligned rectangle given by its top-left corner and size
//!
//! # Coordinate System
//!
//! Documents use a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! All coordinates are `f64` so values read from the document survive
//! unchanged into the rendered output.

/// A 2D point in canvas coordinate space.
///
/// # Examples
///
/// ```
/// # use graffle_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Rotates this point by 180° about `center`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use graffle_core::geometry::Point;
    /// let rotated = Point::new(0.0, 0.0).rotate_half_turn(Point::new(50.0, 25.0));
    /// assert_eq!(rotated, Point::new(100.0, 50.0));
    /// ```
    pub fn rotate_half_turn(self, center: Point) -> Self {
        Self {
            x: 2.0f64.mul_add(center.x, -self.x),
            y: 2.0f64.mul_add(center.y, -self.y),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Width and height of a canvas or graphic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
///
/// Graphic bounds in a document are stored as `{{x, y}, {w, h}}`; this type
/// keeps the same shape. Width and height are expected to be non-negative.
///
/// # Examples
///
/// ```
/// # use graffle_core::geometry::{Point, Rect};
/// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
/// assert_eq!(rect.center(), Point::new(50.0, 25.0));
/// assert_eq!(rect.max_x(), 100.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and dimensions
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn origin(self) -> Point {
        self.origin
    }

    pub fn size(self) -> Size {
        self.size
    }

    pub fn x(self) -> f64 {
        self.origin.x()
    }

    pub fn y(self) -> f64 {
        self.origin.y()
    }

    pub fn width(self) -> f64 {
        self.size.width()
    }

    pub fn height(self) -> f64 {
        self.size.height()
    }

    pub fn max_x(self) -> f64 {
        self.x() + self.width()
    }

    pub fn max_y(self) -> f64 {
        self.y() + self.height()
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(
            self.width().mul_add(0.5, self.x()),
            self.height().mul_add(0.5, self.y()),
        )
    }

    /// Maps a fractional offset (`0.0..=1.0` on each axis) to a canvas point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use graffle_core::geometry::{Point, Rect};
    /// let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
    /// assert_eq!(rect.at_fraction(0.5, 1.0), Point::new(60.0, 60.0));
    /// ```
    pub fn at_fraction(self, fx: f64, fy: f64) -> Point {
        Point::new(
            self.width().mul_add(fx, self.x()),
            self.height().mul_add(fy, self.y()),
        )
    }

    /// Returns the four components `[x, y, width, height]`.
    pub fn to_array(self) -> [f64; 4] {
        [self.x(), self.y(), self.width(), self.height()]
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, -2.0);

        assert_eq!(a.add_point(b), Point::new(4.0, 2.0));
    }

    #[test]
    fn test_rotate_half_turn() {
        let center = Point::new(10.0, 10.0);

        assert_eq!(
            Point::new(0.0, 5.0).rotate_half_turn(center),
            Point::new(20.0, 15.0)
        );
        assert_eq!(center.rotate_half_turn(center), center);
    }

    #[test]
    fn test_rect_accessors() {
        let rect = Rect::new(5.0, 10.0, 20.0, 40.0);

        assert_eq!(rect.x(), 5.0);
        assert_eq!(rect.y(), 10.0);
        assert_eq!(rect.width(), 20.0);
        assert_eq!(rect.height(), 40.0);
        assert_eq!(rect.max_x(), 25.0);
        assert_eq!(rect.max_y(), 50.0);
        assert_eq!(rect.to_array(), [5.0, 10.0, 20.0, 40.0]);
    }

    #[test]
    fn test_rect_center_and_fraction() {
        let rect = Rect::new(0.0, 0.0, 90.0, 30.0);

        let center = rect.center();
        assert_approx_eq!(f64, center.x(), 45.0);
        assert_approx_eq!(f64, center.y(), 15.0);

        let third = rect.at_fraction(1.0 / 3.0, 2.0 / 3.0);
        assert_approx_eq!(f64, third.x(), 30.0);
        assert_approx_eq!(f64, third.y(), 20.0);
    }
}
