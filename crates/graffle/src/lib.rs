//! Graffle - Decoding and previewing OmniGraffle diagram documents.
//!
//! Container sniffing, document building, rendering, and SVG export for
//! `.graffle` files. A document is opened from any of its container forms,
//! built into a typed model, rendered sheet by sheet to vector primitives,
//! and finally written as SVG.

pub mod config;
pub mod container;
pub mod render;

mod error;
mod export;

pub use graffle_core::{color, document, draw, geometry};

pub use error::GraffleError;
pub use graffle_core::error::Error as DocumentError;

use std::path::Path;

use log::{debug, info, trace};

use graffle_parser::BuildConfig;

use config::AppConfig;
use document::Document;
use export::Exporter;
use render::RenderedSheet;

/// Builder for opening, rendering, and exporting graffle documents.
///
/// # Examples
///
/// ```rust,no_run
/// use graffle::{PreviewBuilder, config::AppConfig};
///
/// // With custom config
/// let builder = PreviewBuilder::new(AppConfig::default());
///
/// // Decode the container and build the document model
/// let document = builder.open("diagram.graffle".as_ref())
///     .expect("Failed to open");
///
/// // Render every sheet, then export the first one
/// let sheets = builder.render_document(&document)
///     .expect("Failed to render");
/// let svg = builder.render_svg(&sheets[0])
///     .expect("Failed to export");
///
/// // Or use default config
/// let builder = PreviewBuilder::default();
/// ```
#[derive(Default)]
pub struct PreviewBuilder {
    config: AppConfig,
}

impl PreviewBuilder {
    /// Create a new preview builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including text and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Open a document from a file or directory bundle.
    ///
    /// The container is sniffed and decoded, and its payload is built into a
    /// [`Document`]. Rich-text runs without a declared codepage use the
    /// configured default encoding.
    ///
    /// # Errors
    ///
    /// Returns [`GraffleError::ContainerFormat`] when the input is not a
    /// recognized container or its payload is not a dictionary, and
    /// [`GraffleError::Document`] when the payload cannot be built.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use graffle::PreviewBuilder;
    ///
    /// let document = PreviewBuilder::default()
    ///     .open("diagram.graffle".as_ref())
    ///     .expect("Failed to open document");
    /// println!("{} sheets", document.sheets().len());
    /// ```
    pub fn open(&self, path: &Path) -> Result<Document, GraffleError> {
        info!(path:? = path; "Opening document");

        let (root, preview) = container::read(path)?.into_parts();
        let dict = root.as_dictionary().ok_or_else(|| {
            GraffleError::ContainerFormat("payload root is not a dictionary".to_string())
        })?;

        let build_config = BuildConfig::new(self.config.text().default_encoding());
        let document = graffle_parser::build(dict, build_config)?.with_preview(preview);

        debug!(
            sheets = document.sheets().len(),
            has_preview = document.preview().is_some();
            "Document opened"
        );
        trace!(document:?; "Built document");

        Ok(document)
    }

    /// Render one sheet to primitives.
    ///
    /// # Errors
    ///
    /// Returns [`GraffleError::Document`] for graphics that cannot be
    /// rendered or text that cannot be decoded.
    pub fn render_sheet(&self, sheet: &document::Sheet) -> Result<RenderedSheet, GraffleError> {
        Ok(render::render_sheet(sheet)?)
    }

    /// Render every sheet of a document, stopping at the first failure.
    pub fn render_document(&self, document: &Document) -> Result<Vec<RenderedSheet>, GraffleError> {
        Ok(render::render_document(document)?)
    }

    /// Export a rendered sheet to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`GraffleError::Config`] for an invalid background color and
    /// [`GraffleError::Export`] when the sheet has an empty canvas.
    pub fn render_svg(&self, sheet: &RenderedSheet) -> Result<String, GraffleError> {
        let doc = self.svg_exporter()?.render_sheet(sheet)?;
        info!(title = sheet.title(); "SVG rendered successfully");
        Ok(doc.to_string())
    }

    /// Export a rendered sheet to an SVG file.
    pub fn write_svg(&self, sheet: &RenderedSheet, path: &Path) -> Result<(), GraffleError> {
        self.svg_exporter()?.export_sheet(sheet, path)?;
        Ok(())
    }

    fn svg_exporter(&self) -> Result<export::svg::Svg, GraffleError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(GraffleError::Config)?;

        Ok(export::svg::SvgBuilder::new()
            .with_background(background)
            .with_text(self.config.text())
            .build())
    }
}

#[cfg(test)]
mod tests {
    use graffle_core::document::Sheet;

    use super::*;
    use crate::config::StyleConfig;

    #[test]
    fn test_invalid_background_is_config_error() {
        let config = AppConfig::new(
            config::TextConfig::default(),
            StyleConfig::new(Some("nope".to_string())),
        );
        let builder = PreviewBuilder::new(config);
        let sheet = builder.render_sheet(&Sheet::new("s", Vec::new())).unwrap();

        assert!(matches!(
            builder.render_svg(&sheet),
            Err(GraffleError::Config(_))
        ));
    }

    #[test]
    fn test_empty_canvas_is_export_error() {
        let builder = PreviewBuilder::default();
        let flat = Sheet::new("s", Vec::new()).with_canvas(None, Some(geometry::Size::new(0.0, 0.0)));
        let sheet = builder.render_sheet(&flat).unwrap();

        assert!(matches!(
            builder.render_svg(&sheet),
            Err(GraffleError::Export(_))
        ));
    }
}
