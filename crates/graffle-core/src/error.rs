//! Domain errors raised while building and rendering a document.

use thiserror::Error;

/// Errors raised by the document model builder and the renderer.
///
/// Every variant is terminal for the current build or render call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A textual point or rectangle did not match the `{x, y}` /
    /// `{{x, y}, {w, h}}` grammar.
    #[error("invalid geometry string `{input}`: {reason}")]
    GeometryParse { input: String, reason: String },

    /// A graphic, shape, or path element that has no rendering rule.
    #[error("unsupported graphic: {0}")]
    UnsupportedGraphic(String),

    /// An arrow name outside the known arrow kinds.
    #[error("unsupported arrow type `{0}`")]
    UnsupportedArrow(String),

    /// A color record naming an unknown system color or with no usable components.
    #[error("unsupported color: {0}")]
    UnsupportedColor(String),

    /// A rich-text run that could not be turned into Unicode text.
    #[error("failed to decode text: {0}")]
    TextDecode(String),

    /// A shaped graphic referencing an export shape its sheet does not define.
    #[error("export shape `{0}` not found on sheet")]
    ExportShapeNotFound(String),
}

impl Error {
    /// Create a [`Error::GeometryParse`] for the given input.
    pub fn geometry(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::GeometryParse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the graffle crates.
pub type Result<T, E = Error> = std::result::Result<T, E>;
