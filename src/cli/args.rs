//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use crate::viewbox::CropMode;

/// Crop SVG files to the bounds of their path content
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Input SVG file, directory of SVG files, or glob pattern (e.g. "icons/*.svg")
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub input: String,

    /// Output file, or output directory in batch mode.
    ///
    /// Defaults to `<name>_cropped.svg` next to each input.
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub output: Option<PathBuf>,

    /// Process every SVG matched by the input (implied by directories and globs)
    #[arg(short, long)]
    pub batch: bool,

    /// Padding to keep around the content, in user-space units (default: 0)
    #[arg(short, long, allow_negative_numbers = true)]
    pub padding: Option<f32>,

    /// viewBox policy: tight crop, or square centered on the content (default: square)
    #[arg(short, long, value_enum)]
    pub mode: Option<CropMode>,

    /// Suffix appended to file stems when no output is given (default: _cropped)
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Process batch files in parallel
    #[arg(short = 'j', long)]
    pub parallel: bool,

    /// Exit with status 2 when any file in a batch fails
    #[arg(long)]
    pub strict: bool,

    /// Config file path (TOML)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}
