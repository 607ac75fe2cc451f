//! # Graffle Parser
//!
//! Turns the generic property-list tree decoded from a graffle container into
//! a typed [`Document`]. Geometry strings are parsed eagerly and every style
//! default is resolved here, so later stages work only with numeric types and
//! resolved records.
//!
//! ## Usage
//!
//! ```
//! # use graffle_parser::{build, BuildConfig};
//! # use graffle_core::error::Error;
//! fn main() -> Result<(), Error> {
//!     let mut root = plist::Dictionary::new();
//!     root.insert("SheetTitle".to_string(), "Overview".into());
//!     root.insert("GraphicsList".to_string(), plist::Value::Array(Vec::new()));
//!
//!     let document = build(&root, BuildConfig::default())?;
//!     assert_eq!(document.sheets()[0].title(), "Overview");
//!     Ok(())
//! }
//! ```

mod builder;
pub mod geometry;
pub mod rtf;
mod style;
mod value;

pub use builder::BuildConfig;

use graffle_core::{document::Document, error::Result};

use builder::Builder;

/// Build a typed document from the root dictionary of a decoded payload.
///
/// Documents with a `Sheets` array yield one sheet per entry; older
/// single-sheet documents are treated as one sheet holding the root itself.
///
/// # Errors
///
/// Fails with the first [`graffle_core::error::Error`] encountered; no partial
/// document is returned.
pub fn build(root: &plist::Dictionary, config: BuildConfig) -> Result<Document> {
    Builder::new(config).build(root)
}
