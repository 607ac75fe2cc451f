//! Color handling for graffle documents
//!
//! Documents store colors in three historical encodings: a named entry from
//! the system color catalog, normalized sRGB components in `0.0..=1.0`, and
//! raw byte components in `0..=255`. [`Color`] keeps the encoding as read and
//! [`Color::to_rgb8`] resolves any of them to an [`Rgb8`] triple.
//!
//! The system color table is written as CSS color strings and parsed with the
//! `color` crate, the same way configured colors are.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

use crate::error::Error;

/// An 8-bit RGB triple, the resolved form of every document color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS color string such as `"#ff0000"`, `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// Alpha is discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use graffle_core::color::Rgb8;
    ///
    /// assert_eq!(Rgb8::from_css("#ff8000").unwrap(), Rgb8::new(255, 128, 0));
    /// assert!(Rgb8::from_css("not-a-color").is_err());
    /// ```
    pub fn from_css(color_str: &str) -> Result<Self, String> {
        let color = DynamicColor::from_str(color_str)
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))?;
        let rgba = color.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self::new(rgba.r, rgba.g, rgba.b))
    }

    /// Returns the components as a tuple.
    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb8> for svg::node::Value {
    fn from(color: Rgb8) -> Self {
        Self::from(color.to_string())
    }
}

/// Named entries of the system color catalog.
///
/// Values approximate the light appearance of the authoring platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemColor {
    ControlBackgroundColor,
    ControlColor,
    ControlTextColor,
    DisabledControlTextColor,
    GridColor,
    HeaderColor,
    HeaderTextColor,
    HighlightColor,
    KeyboardFocusIndicatorColor,
    LabelColor,
    LinkColor,
    SecondaryLabelColor,
    SelectedControlColor,
    SelectedTextBackgroundColor,
    SelectedTextColor,
    SeparatorColor,
    ShadowColor,
    TextBackgroundColor,
    TextColor,
    WindowBackgroundColor,
    WindowFrameColor,
}

impl SystemColor {
    /// Returns the catalog name as written in documents.
    pub fn name(self) -> &'static str {
        self.entry().0
    }

    /// Returns the CSS value this color renders as.
    pub fn css(self) -> &'static str {
        self.entry().1
    }

    /// Resolves the catalog entry to an 8-bit triple.
    pub fn to_rgb8(self) -> Rgb8 {
        Rgb8::from_css(self.css()).expect("system color table holds valid CSS colors")
    }

    fn entry(self) -> (&'static str, &'static str) {
        match self {
            Self::ControlBackgroundColor => ("controlBackgroundColor", "#ffffff"),
            Self::ControlColor => ("controlColor", "#ffffff"),
            Self::ControlTextColor => ("controlTextColor", "#000000"),
            Self::DisabledControlTextColor => ("disabledControlTextColor", "#bfbfbf"),
            Self::GridColor => ("gridColor", "#e6e6e6"),
            Self::HeaderColor => ("headerColor", "#ffffff"),
            Self::HeaderTextColor => ("headerTextColor", "#000000"),
            Self::HighlightColor => ("highlightColor", "#ffffff"),
            Self::KeyboardFocusIndicatorColor => ("keyboardFocusIndicatorColor", "#3b99fc"),
            Self::LabelColor => ("labelColor", "#000000"),
            Self::LinkColor => ("linkColor", "#0068da"),
            Self::SecondaryLabelColor => ("secondaryLabelColor", "#808080"),
            Self::SelectedControlColor => ("selectedControlColor", "#b3d7ff"),
            Self::SelectedTextBackgroundColor => ("selectedTextBackgroundColor", "#b3d7ff"),
            Self::SelectedTextColor => ("selectedTextColor", "#000000"),
            Self::SeparatorColor => ("separatorColor", "#e5e5e5"),
            Self::ShadowColor => ("shadowColor", "#000000"),
            Self::TextBackgroundColor => ("textBackgroundColor", "#ffffff"),
            Self::TextColor => ("textColor", "#000000"),
            Self::WindowBackgroundColor => ("windowBackgroundColor", "#ececec"),
            Self::WindowFrameColor => ("windowFrameColor", "#aaaaaa"),
        }
    }

    const ALL: [Self; 21] = [
        Self::ControlBackgroundColor,
        Self::ControlColor,
        Self::ControlTextColor,
        Self::DisabledControlTextColor,
        Self::GridColor,
        Self::HeaderColor,
        Self::HeaderTextColor,
        Self::HighlightColor,
        Self::KeyboardFocusIndicatorColor,
        Self::LabelColor,
        Self::LinkColor,
        Self::SecondaryLabelColor,
        Self::SelectedControlColor,
        Self::SelectedTextBackgroundColor,
        Self::SelectedTextColor,
        Self::SeparatorColor,
        Self::ShadowColor,
        Self::TextBackgroundColor,
        Self::TextColor,
        Self::WindowBackgroundColor,
        Self::WindowFrameColor,
    ];
}

impl FromStr for SystemColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or_else(|| Error::UnsupportedColor(format!("unknown system color `{s}`")))
    }
}

/// A color as recorded in a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// An entry of the system color catalog.
    Named(SystemColor),
    /// Normalized sRGB components, each nominally in `0.0..=1.0`.
    Rgb { r: f64, g: f64, b: f64 },
    /// Byte components, already in `0..=255`.
    RgbByte { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Resolves the color to an 8-bit triple.
    ///
    /// Normalized components are scaled by 256, floored, and clamped to
    /// `0..=255`, so a component of exactly `1.0` maps to `255`.
    ///
    /// # Examples
    ///
    /// ```
    /// use graffle_core::color::{Color, Rgb8};
    ///
    /// let red = Color::Rgb { r: 1.0, g: 0.0, b: 0.0 };
    /// assert_eq!(red.to_rgb8(), Rgb8::new(255, 0, 0));
    /// ```
    pub fn to_rgb8(self) -> Rgb8 {
        match self {
            Self::Named(name) => name.to_rgb8(),
            Self::Rgb { r, g, b } => Rgb8::new(
                normalized_channel(r),
                normalized_channel(g),
                normalized_channel(b),
            ),
            Self::RgbByte { r, g, b } => Rgb8::new(r, g, b),
        }
    }
}

/// Scales a normalized component to a byte channel.
fn normalized_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value * 256.0).floor().clamp(0.0, 255.0) as u8
}
