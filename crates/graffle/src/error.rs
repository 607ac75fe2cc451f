//! Error types for graffle operations.
//!
//! This module provides the main error type [`GraffleError`] which wraps the
//! error conditions that can occur while opening, rendering, and exporting a
//! document.

use std::io;

use thiserror::Error;

/// The main error type for graffle operations.
///
/// Domain failures raised while building or rendering a document are carried
/// unchanged in the `Document` variant.
#[derive(Debug, Error)]
pub enum GraffleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a recognized container, or its payload could not be
    /// decompressed or decoded.
    #[error("Container format error: {0}")]
    ContainerFormat(String),

    #[error(transparent)]
    Document(#[from] graffle_core::error::Error),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for GraffleError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl GraffleError {
    pub(crate) fn container(message: impl Into<String>) -> Self {
        Self::ContainerFormat(message.into())
    }
}
