//! Style record resolution.
//!
//! Fill and stroke records are resolved once at build time into
//! [`graffle_core::document::Style`], so rendering never re-derives defaults.

use log::{debug, trace};
use plist::{Dictionary, Value};

use graffle_core::{
    color::{Color, SystemColor},
    document::{Paint, Stroke, Style},
    draw::{ArrowKind, PatternCode},
    error::{Error, Result},
};

use crate::value::{dict_field, flag_field, number, number_field, string_field};

/// How a graphic's fill is resolved when the record is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPolicy {
    /// Lines never fill, whatever the record says.
    Never,
    /// Shaped graphics fill white unless told otherwise.
    DefaultWhite,
}

/// Resolves a graphic's `Style` dictionary.
pub fn parse_style(record: Option<&Dictionary>, fill_policy: FillPolicy) -> Result<Style> {
    let fill = match fill_policy {
        FillPolicy::Never => None,
        FillPolicy::DefaultWhite => parse_fill(record.and_then(|r| dict_field(r, "fill")))?,
    };
    let stroke = record
        .and_then(|r| dict_field(r, "stroke"))
        .map(parse_stroke)
        .transpose()?;

    Ok(Style::new(fill, stroke))
}

fn parse_fill(record: Option<&Dictionary>) -> Result<Option<Paint>> {
    let Some(record) = record else {
        debug!("No fill record, filling white");
        return Ok(Some(Paint::white()));
    };
    if flag_field(record, "Draws") == Some(false) {
        return Ok(None);
    }

    match dict_field(record, "Color") {
        Some(color) => Ok(Some(Paint::new(parse_color(color)?))),
        None => {
            debug!("Fill record has no color, filling white");
            Ok(Some(Paint::white()))
        }
    }
}

fn parse_stroke(record: &Dictionary) -> Result<Stroke> {
    let color = dict_field(record, "Color").map(parse_color).transpose()?;
    let width = match number_field(record, "Width").filter(|width| *width != 0.0) {
        Some(width) => width,
        None => {
            debug!("Stroke width missing or zero, using 1");
            1.0
        }
    };

    Ok(Stroke {
        color,
        width,
        drawn: flag_field(record, "Draws").unwrap_or(true),
        pattern: number_field(record, "Pattern").map(|code| PatternCode(code as i64)),
        head_arrow: parse_arrow(record.get("HeadArrow"))?,
        tail_arrow: parse_arrow(record.get("TailArrow"))?,
        corner_radius: number_field(record, "CornerRadius").unwrap_or(0.0),
    })
}

/// Resolves an arrow field. `"0"`, an empty string, or a zero number means
/// no arrow.
pub fn parse_arrow(value: Option<&Value>) -> Result<Option<ArrowKind>> {
    match value {
        None => Ok(None),
        Some(Value::String(name)) if name.is_empty() || name == "0" => Ok(None),
        Some(Value::String(name)) => name.parse().map(Some),
        Some(other) if number(other) == Some(0.0) => Ok(None),
        Some(other) => Err(Error::UnsupportedArrow(format!("{other:?}"))),
    }
}

/// Resolves a color record.
///
/// A `System` catalog entry is looked up by name. A record declaring the
/// `srgb` space carries normalized components, as does a grayscale `w`
/// record. Any other record carries byte components.
pub fn parse_color(record: &Dictionary) -> Result<Color> {
    if string_field(record, "catalog")
        .is_some_and(|catalog| catalog.eq_ignore_ascii_case("system"))
    {
        let name = string_field(record, "name")
            .ok_or_else(|| Error::UnsupportedColor("system color without a name".to_string()))?;
        trace!(name; "Resolving system color");
        return name.parse::<SystemColor>().map(Color::Named);
    }

    let normalized = string_field(record, "space")
        .is_some_and(|space| space.eq_ignore_ascii_case("srgb"));
    let channel = |key: &str| number_field(record, key);

    let (r, g, b) = (channel("r"), channel("g"), channel("b"));
    if r.is_none() && g.is_none() && b.is_none() {
        if let Some(white) = channel("w") {
            return Ok(Color::Rgb {
                r: white,
                g: white,
                b: white,
            });
        }
        return Err(Error::UnsupportedColor(format!(
            "color record has no components: {:?}",
            record.keys().collect::<Vec<_>>()
        )));
    }
    let (r, g, b) = (r.unwrap_or(0.0), g.unwrap_or(0.0), b.unwrap_or(0.0));

    if normalized {
        Ok(Color::Rgb { r, g, b })
    } else {
        Ok(Color::RgbByte {
            r: to_byte(r),
            g: to_byte(g),
            b: to_byte(b),
        })
    }
}

fn to_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
