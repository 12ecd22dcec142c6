//! svgcrop - crop SVG documents to the bounds of their path content.

mod batch;
mod cli;
mod config;
mod error;
mod geometry;
mod logger;
mod pipeline;
mod rewrite;
mod viewbox;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, EXIT_ERROR, EXIT_SUCCESS};
use config::CropConfig;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print().ok();
            let status = if err.use_stderr() { EXIT_ERROR } else { EXIT_SUCCESS };
            return Ok(ExitCode::from(status));
        }
    };

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    // Checked before any file is touched.
    let extractor = match geometry::default_extractor() {
        Ok(extractor) => extractor,
        Err(err) => {
            log!("error"; "{}", err);
            return Ok(ExitCode::from(EXIT_ERROR));
        }
    };

    let config = match CropConfig::load(&cli) {
        Ok(config) => config,
        Err(err) => {
            log!("error"; "{:#}", anyhow::Error::from(err));
            return Ok(ExitCode::from(EXIT_ERROR));
        }
    };
    let status = cli::crop::run(&cli, &config, extractor.as_ref())?;
    Ok(ExitCode::from(status))
}
