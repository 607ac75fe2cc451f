//! CLI logic for the graffle previewer.
//!
//! This module contains the core CLI logic: open a document, render the
//! selected sheets, and write them as SVG files.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use graffle::{GraffleError, PreviewBuilder, document::Document};

/// Run the graffle CLI application
///
/// This function opens the input document, renders the selected sheets, and
/// writes each as an SVG file. Without a sheet selector every sheet is
/// written: the first to the output path, later ones next to it as
/// `<stem>-<n>.<ext>`.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `GraffleError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Container and document errors
/// - Rendering and export errors
pub fn run(args: &Args) -> Result<(), GraffleError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing document"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    let builder = PreviewBuilder::new(app_config);
    let document = builder.open(Path::new(&args.input))?;

    if let Some(preview_path) = &args.preview {
        write_preview(&document, Path::new(preview_path))?;
    }

    let output = Path::new(&args.output);
    match &args.sheet {
        Some(selector) => {
            let sheet = select_sheet(&document, selector)?;
            let rendered = builder.render_sheet(&document.sheets()[sheet])?;
            builder.write_svg(&rendered, output)?;
            info!(output_file = args.output, sheet; "SVG exported successfully");
        }
        None => {
            let rendered = builder.render_document(&document)?;
            for (index, sheet) in rendered.iter().enumerate() {
                let path = sheet_output_path(output, index);
                builder.write_svg(sheet, &path)?;
                info!(
                    output_file = path.display().to_string(),
                    title = sheet.title();
                    "SVG exported successfully"
                );
            }
        }
    }

    Ok(())
}

/// Resolves a sheet selector, a 1-based number or a sheet title, to an index.
fn select_sheet(document: &Document, selector: &str) -> Result<usize, GraffleError> {
    let sheets = document.sheets();
    let by_number = selector
        .parse::<usize>()
        .ok()
        .filter(|number| (1..=sheets.len()).contains(number))
        .map(|number| number - 1);

    by_number
        .or_else(|| sheets.iter().position(|sheet| sheet.title() == selector))
        .ok_or_else(|| {
            GraffleError::Config(format!(
                "no sheet `{selector}` (document has {} sheets)",
                sheets.len()
            ))
        })
}

/// Output path of the sheet at `index`: the output itself for the first
/// sheet, `<stem>-<n>.<ext>` for sheet number `n` after it.
fn sheet_output_path(output: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return output.to_path_buf();
    }

    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{stem}-{}.{}", index + 1, ext.to_string_lossy()),
        None => format!("{stem}-{}", index + 1),
    };
    output.with_file_name(name)
}

fn write_preview(document: &Document, path: &Path) -> Result<(), GraffleError> {
    match document.preview() {
        Some(preview) => {
            fs::write(path, preview.data())?;
            info!(
                path = path.display().to_string(),
                media_type = preview.media_type();
                "Preview image written"
            );
        }
        None => warn!("Document has no preview image"),
    }
    Ok(())
}
