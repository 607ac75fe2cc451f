//! Command-line argument definitions for the graffle CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, sheet selection,
//! preview extraction, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the graffle previewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input document (file or directory bundle)
    #[arg(help = "Path to the input document")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Sheet to export, by 1-based number or title; all sheets when omitted
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Write the embedded preview image to this path
    #[arg(long)]
    pub preview: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
