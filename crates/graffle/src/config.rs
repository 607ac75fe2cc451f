//! Configuration types for graffle decoding and rendering.
//!
//! This module provides configuration structures that control how rich text
//! is decoded and how exported sheets are styled. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining text and style settings.
//! - [`TextConfig`] - Controls the fallback text encoding and label fonts.
//! - [`StyleConfig`] - Controls visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use graffle::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.text().default_encoding(), "gbk");
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use graffle_core::color::Rgb8;

/// Top-level application configuration combining text and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Text configuration section.
    #[serde(default)]
    text: TextConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified text and style configurations.
    pub fn new(text: TextConfig, style: StyleConfig) -> Self {
        Self { text, style }
    }

    /// Returns the text configuration.
    pub fn text(&self) -> &TextConfig {
        &self.text
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Rich-text decoding and label font settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Encoding label used when a rich-text run declares no codepage.
    default_encoding: String,

    font_family: String,

    font_size: f64,
}

impl TextConfig {
    /// Creates a new [`TextConfig`].
    ///
    /// # Arguments
    ///
    /// * `default_encoding` - Encoding label for runs without `\ansicpgN`.
    /// * `font_family` - Font family of exported labels.
    /// * `font_size` - Font size of exported labels.
    pub fn new(
        default_encoding: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f64,
    ) -> Self {
        Self {
            default_encoding: default_encoding.into(),
            font_family: font_family.into(),
            font_size,
        }
    }

    pub fn default_encoding(&self) -> &str {
        &self.default_encoding
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self::new("gbk", "Helvetica", 12.0)
    }
}

/// Visual styling configuration for exported sheets.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color of exported sheets, as a CSS color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`] with an optional background color string.
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background color, or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Rgb8>, String> {
        self.background_color
            .as_deref()
            .map(Rgb8::from_css)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
