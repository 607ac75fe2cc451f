use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info};
use svg::{Document, node::element::Rectangle};

use graffle_core::color::Rgb8;

use crate::{config::TextConfig, export, render::RenderedSheet};

mod markers;
mod primitive;

/// Builder for the SVG exporter.
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    background: Option<Rgb8>,
    font_family: String,
    font_size: f64,
}

impl SvgBuilder {
    pub fn new() -> Self {
        let text = TextConfig::default();
        Self {
            background: None,
            font_family: text.font_family().to_string(),
            font_size: text.font_size(),
        }
    }

    /// Paint a rectangle of this color under the whole canvas.
    pub fn with_background(mut self, background: Option<Rgb8>) -> Self {
        self.background = background;
        self
    }

    /// Use the label font of the given text settings.
    pub fn with_text(mut self, text: &TextConfig) -> Self {
        self.font_family = text.font_family().to_string();
        self.font_size = text.font_size();
        self
    }

    pub fn build(self) -> Svg {
        Svg {
            background: self.background,
            font_family: self.font_family,
            font_size: self.font_size,
        }
    }
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// SVG exporter for rendered sheets.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Rgb8>,
    font_family: String,
    font_size: f64,
}

impl Svg {
    /// Build the SVG document of a rendered sheet.
    ///
    /// The view box is the sheet canvas. Marker definitions come first,
    /// followed by the optional background and then one element per
    /// primitive in paint order.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] when the canvas has no area.
    pub fn render_sheet(&self, sheet: &RenderedSheet) -> Result<Document, export::Error> {
        let origin = sheet.origin();
        let size = sheet.size();
        let dims = [origin.x(), origin.y(), size.width(), size.height()];
        if dims.iter().any(|v| !v.is_finite()) || size.width() <= 0.0 || size.height() <= 0.0 {
            return Err(export::Error::Render(format!(
                "sheet `{}` has an empty canvas ({}x{})",
                sheet.title(),
                size.width(),
                size.height()
            )));
        }

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    origin.x(),
                    origin.y(),
                    size.width(),
                    size.height()
                ),
            )
            .set("width", size.width())
            .set("height", size.height());

        doc = doc.add(markers::create_marker_definitions(sheet.markers()));

        if let Some(background) = self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", origin.x())
                    .set("y", origin.y())
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", background.to_string()),
            );
        }

        for primitive in sheet.primitives() {
            for node in self.render_primitive(primitive) {
                doc = doc.add(node);
            }
        }

        debug!(
            title = sheet.title(),
            primitives = sheet.primitives().len();
            "SVG document rendered"
        );
        Ok(doc)
    }

    /// Writes an SVG document to the specified file
    pub fn write_document(&self, doc: &Document, path: &Path) -> Result<(), export::Error> {
        info!(path:? = path; "Creating SVG file");
        // Create the output file
        let f = match File::create(path) {
            Ok(file) => file,
            Err(err) => {
                error!(path:? = path, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        // Write the SVG content to the file
        if let Err(err) = write!(&f, "{doc}") {
            error!(path:? = path, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl export::Exporter for Svg {
    fn export_sheet(&self, sheet: &RenderedSheet, path: &Path) -> Result<(), export::Error> {
        let doc = self.render_sheet(sheet)?;
        self.write_document(&doc, path)
    }
}
