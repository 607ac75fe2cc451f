//! Stroke and dash-pattern definitions.
//!
//! # Overview
//!
//! Exported types:
//! - [`PatternCode`]: The numeric dash-pattern code stored in documents
//! - [`DashPattern`]: The dash patterns with a known rendering
//! - [`StrokeDefinition`]: A fully resolved stroke (color, width, dash pattern)
//! - [`apply_stroke!`](crate::apply_stroke!): Macro for applying stroke attributes to SVG elements
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke` | `"#000000"` |
//! | `width` | `stroke-width` | `2` |
//! | `dash` | `stroke-dasharray` | `"5,5"`, `"1,4"` |

use std::fmt;

use log::warn;

use crate::color::Rgb8;

/// A dash-pattern code as stored in a document's stroke record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternCode(pub i64);

impl fmt::Display for PatternCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dash patterns with a known rendering.
///
/// # SVG Mapping
///
/// - `Solid`: No dasharray attribute
/// - `LongDash`: "5,5"
/// - `FineDot`: "1,4"
/// - `DashDot`: "3,4"
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DashPattern {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Code `1`: 5px dash, 5px gap
    LongDash,
    /// Code `2`: 1px dot, 4px gap
    FineDot,
    /// Code `5`: 3px dash, 4px gap
    DashDot,
}

impl DashPattern {
    /// Looks up the pattern for a document code.
    ///
    /// An absent code is a solid line. An unrecognized code also falls back
    /// to solid; this is the only style lookup that does not fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use graffle_core::draw::{DashPattern, PatternCode};
    ///
    /// assert_eq!(DashPattern::from_code(None), DashPattern::Solid);
    /// assert_eq!(DashPattern::from_code(Some(PatternCode(1))), DashPattern::LongDash);
    /// assert_eq!(DashPattern::from_code(Some(PatternCode(42))), DashPattern::Solid);
    /// ```
    pub fn from_code(code: Option<PatternCode>) -> Self {
        match code {
            None | Some(PatternCode(0)) => Self::Solid,
            Some(PatternCode(1)) => Self::LongDash,
            Some(PatternCode(2)) => Self::FineDot,
            Some(PatternCode(5)) => Self::DashDot,
            Some(code) => {
                warn!(code:? = code.0; "Unknown dash pattern, drawing solid line");
                Self::Solid
            }
        }
    }

    /// Returns the dash-length sequence, or `None` for solid lines.
    pub fn lengths(self) -> Option<&'static [f64]> {
        match self {
            Self::Solid => None,
            Self::LongDash => Some(&[5.0, 5.0]),
            Self::FineDot => Some(&[1.0, 4.0]),
            Self::DashDot => Some(&[3.0, 4.0]),
        }
    }

    /// Returns the SVG dasharray value for this pattern, or None for solid lines
    pub fn to_svg_value(self) -> Option<String> {
        self.lengths().map(|lengths| {
            lengths
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join(",")
        })
    }
}

/// A resolved stroke ready for output.
///
/// # Examples
///
/// ```
/// use graffle_core::color::Rgb8;
/// use graffle_core::draw::{DashPattern, StrokeDefinition};
///
/// // Default stroke (black, 1px, solid)
/// let stroke = StrokeDefinition::default();
/// assert_eq!(stroke.width(), 1.0);
///
/// let dashed = StrokeDefinition::new(Rgb8::new(0, 0, 255), 2.0).with_dash(DashPattern::LongDash);
/// assert_eq!(dashed.dash().to_svg_value().as_deref(), Some("5,5"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefinition {
    color: Rgb8,
    width: f64,
    dash: DashPattern,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn new(color: Rgb8, width: f64) -> Self {
        Self {
            color,
            width,
            dash: DashPattern::Solid,
        }
    }

    /// Returns a copy with the given dash pattern.
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Rgb8 {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the dash pattern.
    pub fn dash(&self) -> DashPattern {
        self.dash
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Rgb8::BLACK, 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, width, and the dash pattern (if not solid).
///
/// # Examples
///
/// ```
/// use graffle_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::default();
/// let rect = svg_element::Rectangle::new()
///     .set("x", 0)
///     .set("y", 0)
///     .set("width", 100)
///     .set("height", 50);
///
/// let rect = graffle_core::apply_stroke!(rect, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.dash().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_pattern_table() {
        assert_eq!(
            DashPattern::from_code(Some(PatternCode(1))).lengths(),
            Some(&[5.0, 5.0][..])
        );
        assert_eq!(
            DashPattern::from_code(Some(PatternCode(2))).lengths(),
            Some(&[1.0, 4.0][..])
        );
        assert_eq!(
            DashPattern::from_code(Some(PatternCode(5))).lengths(),
            Some(&[3.0, 4.0][..])
        );
    }

    #[test]
    fn test_absent_pattern_is_solid() {
        assert_eq!(DashPattern::from_code(None), DashPattern::Solid);
        assert_eq!(DashPattern::Solid.lengths(), None);
        assert_eq!(DashPattern::Solid.to_svg_value(), None);
    }

    #[test]
    fn test_unknown_pattern_falls_back_to_solid() {
        assert_eq!(
            DashPattern::from_code(Some(PatternCode(3))),
            DashPattern::Solid
        );
        assert_eq!(
            DashPattern::from_code(Some(PatternCode(-1))),
            DashPattern::Solid
        );
    }

    #[test]
    fn test_dash_svg_values() {
        assert_eq!(DashPattern::LongDash.to_svg_value(), Some("5,5".to_string()));
        assert_eq!(DashPattern::FineDot.to_svg_value(), Some("1,4".to_string()));
        assert_eq!(DashPattern::DashDot.to_svg_value(), Some("3,4".to_string()));
    }

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color(), Rgb8::BLACK);
        assert_eq!(stroke.dash(), DashPattern::Solid);
    }
}
