//! Parsers for the textual point and rectangle encodings.
//!
//! Documents store positions as `{x, y}` and rectangles as
//! `{{x, y}, {w, h}}`. Each number is a signed decimal with an optional
//! exponent; whitespace is allowed around every token.

use winnow::{
    Parser as _,
    ascii::{digit0, digit1, multispace0},
    combinator::{alt, delimited, opt, separated_pair},
    error::ModalResult,
    token::one_of,
};

use graffle_core::{
    error::{Error, Result},
    geometry::{Point, Rect, Size},
};

type Pair = (f64, f64);

/// `[+-]digits[.digits][e[+-]digits]`, or a leading `.` with digits.
fn decimal<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        opt(one_of(['+', '-'])),
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<f64> {
    delimited(
        multispace0,
        decimal
            .try_map(str::parse::<f64>)
            // Overflowing exponents parse to infinity.
            .verify(|value: &f64| value.is_finite()),
        multispace0,
    )
    .parse_next(input)
}

/// `{a, b}`, with optional surrounding whitespace.
fn pair(input: &mut &str) -> ModalResult<Pair> {
    delimited(
        multispace0,
        delimited('{', separated_pair(number, ',', number), '}'),
        multispace0,
    )
    .parse_next(input)
}

/// `{{a, b}, {c, d}}`, with optional surrounding whitespace.
fn pair_of_pairs(input: &mut &str) -> ModalResult<(Pair, Pair)> {
    delimited(
        multispace0,
        delimited('{', separated_pair(pair, ',', pair), '}'),
        multispace0,
    )
    .parse_next(input)
}

fn components(input: &str) -> Result<Pair> {
    pair.parse(input)
        .map_err(|err| Error::geometry(input, err.to_string()))
}

fn check_extent(input: &str, width: f64, height: f64) -> Result<()> {
    // Comparisons are written so NaN also fails.
    if width >= 0.0 && height >= 0.0 {
        Ok(())
    } else {
        Err(Error::geometry(input, "width and height must be non-negative"))
    }
}

/// Parse a `{x, y}` point.
///
/// # Examples
///
/// ```
/// use graffle_parser::geometry::parse_point;
///
/// let point = parse_point("{1e3, -2.5e-2}").unwrap();
/// assert_eq!((point.x(), point.y()), (1000.0, -0.025));
/// ```
pub fn parse_point(input: &str) -> Result<Point> {
    components(input).map(Point::from)
}

/// Parse a `{w, h}` size. Negative extents are rejected.
pub fn parse_size(input: &str) -> Result<Size> {
    let (width, height) = components(input)?;
    check_extent(input, width, height)?;
    Ok(Size::new(width, height))
}

/// Parse a `{{x, y}, {w, h}}` rectangle. Negative extents are rejected.
///
/// # Examples
///
/// ```
/// use graffle_parser::geometry::parse_bounds;
///
/// let bounds = parse_bounds("{{0, 0}, {100, 50}}").unwrap();
/// assert_eq!(bounds.to_array(), [0.0, 0.0, 100.0, 50.0]);
/// ```
pub fn parse_bounds(input: &str) -> Result<Rect> {
    let ((x, y), (width, height)) = pair_of_pairs
        .parse(input)
        .map_err(|err| Error::geometry(input, err.to_string()))?;
    check_extent(input, width, height)?;
    Ok(Rect::new(x, y, width, height))
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn coordinate_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![
            (-1_000_000i64..1_000_000).prop_map(|v| v as f64),
            -1.0e6f64..1.0e6,
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Formatting a point with `{x, y}` and parsing it back yields the same values.
    fn check_point_text_is_parsed(x: f64, y: f64) -> Result<(), TestCaseError> {
        let text = format!("{{{x}, {y}}}");
        let point = parse_point(&text).map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(point, Point::new(x, y));
        Ok(())
    }

    /// Exponent notation parses to the same value as plain notation.
    fn check_exponent_notation(x: f64, y: f64) -> Result<(), TestCaseError> {
        let text = format!("{{{x:e}, {y:E}}}");
        let point = parse_point(&text).map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(point, Point::new(x, y));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn point_text_is_parsed(x in coordinate_strategy(), y in coordinate_strategy()) {
            check_point_text_is_parsed(x, y)?;
        }

        #[test]
        fn exponent_notation(x in coordinate_strategy(), y in coordinate_strategy()) {
            check_exponent_notation(x, y)?;
        }
    }
}
