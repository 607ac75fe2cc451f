//! Free-form path operations and their SVG path-data form.

use std::fmt;

use crate::geometry::Point;

/// A single operation of a logical path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    /// A cubic Bézier segment ending at `to`, with its two control points in
    /// document order.
    CurveTo {
        to: Point,
        control1: Point,
        control2: Point,
    },
    Close,
}

impl PathOp {
    /// Returns the operation with every point passed through `f`.
    pub fn map_points(self, f: impl Fn(Point) -> Point) -> Self {
        match self {
            Self::MoveTo(p) => Self::MoveTo(f(p)),
            Self::LineTo(p) => Self::LineTo(f(p)),
            Self::CurveTo {
                to,
                control1,
                control2,
            } => Self::CurveTo {
                to: f(to),
                control1: f(control1),
                control2: f(control2),
            },
            Self::Close => Self::Close,
        }
    }
}

impl fmt::Display for PathOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M{} {}", p.x(), p.y()),
            Self::LineTo(p) => write!(f, "L{} {}", p.x(), p.y()),
            Self::CurveTo {
                to,
                control1,
                control2,
            } => write!(
                f,
                "C{} {} {} {} {} {}",
                control1.x(),
                control1.y(),
                control2.x(),
                control2.y(),
                to.x(),
                to.y()
            ),
            Self::Close => write!(f, "Z"),
        }
    }
}

/// An ordered sequence of path operations.
///
/// Displays as SVG path data with operations separated by single spaces.
///
/// # Examples
///
/// ```
/// use graffle_core::draw::{PathData, PathOp};
/// use graffle_core::geometry::Point;
///
/// let path = PathData::new(vec![
///     PathOp::MoveTo(Point::new(0.0, 0.0)),
///     PathOp::LineTo(Point::new(10.0, 0.0)),
///     PathOp::Close,
/// ]);
/// assert_eq!(path.to_string(), "M0 0 L10 0 Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    ops: Vec<PathOp>,
}

impl PathData {
    pub fn new(ops: Vec<PathOp>) -> Self {
        Self { ops }
    }
}

impl FromIterator<PathOp> for PathData {
    fn from_iter<T: IntoIterator<Item = PathOp>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, op) in self.ops.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}
