//! Error adapter for converting GraffleError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every error maps
//! to a stable diagnostic code; some also carry a hint.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use graffle::{DocumentError, GraffleError, document::MAX_GROUP_DEPTH};

/// Adapter rendering a [`GraffleError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a GraffleError);

impl ErrorAdapter<'_> {
    /// Returns the stable diagnostic code of the wrapped error.
    pub fn code_str(&self) -> &'static str {
        match self.0 {
            GraffleError::Io(_) => "graffle::io",
            GraffleError::ContainerFormat(_) => "graffle::container",
            GraffleError::Document(err) => match err {
                DocumentError::GeometryParse { .. } => "graffle::geometry",
                DocumentError::UnsupportedGraphic(_) => "graffle::graphic",
                DocumentError::UnsupportedArrow(_) => "graffle::arrow",
                DocumentError::UnsupportedColor(_) => "graffle::color",
                DocumentError::TextDecode(_) => "graffle::text",
                DocumentError::ExportShapeNotFound(_) => "graffle::export_shape",
            },
            GraffleError::Export(_) => "graffle::export",
            GraffleError::Config(_) => "graffle::config",
        }
    }

    fn help_text(&self) -> Option<String> {
        match self.0 {
            GraffleError::ContainerFormat(_) => Some(
                "expected a compressed or plain property list, a zip archive, or a bundle directory"
                    .to_string(),
            ),
            GraffleError::Document(DocumentError::GeometryParse { .. }) => {
                Some("points are written `{x, y}` and bounds `{{x, y}, {w, h}}`".to_string())
            }
            GraffleError::Document(DocumentError::UnsupportedGraphic(_)) => Some(format!(
                "supported classes are LineGraphic, ShapedGraphic and Group, nested at most {MAX_GROUP_DEPTH} levels"
            )),
            GraffleError::Document(DocumentError::UnsupportedArrow(_)) => Some(
                "supported arrows are StickArrow, Arrow, UMLInheritance and FilledBall".to_string(),
            ),
            GraffleError::Document(DocumentError::TextDecode(_)) => {
                Some("set `default_encoding` in the `[text]` config section".to_string())
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
