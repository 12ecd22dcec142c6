//! Batch processing.
//!
//! Runs the crop pipeline over every enumerated file. A failing file is
//! recorded in the report and the batch moves on; only a fatal error
//! (see [`CropError::is_fatal`]) stops the loop early.
//!
//! # Modules
//!
//! - [`input`]: Input classification, enumeration and output paths

mod input;

pub use input::{InputSpec, batch_output, single_output};

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::{debug, error::CropError, logger, pipeline::Cropper, viewbox::ViewBoxRect};

/// One input/output pair to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Result of cropping one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<ViewBoxRect, CropError>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    fn is_fatal(&self) -> bool {
        self.result.as_ref().is_err_and(CropError::is_fatal)
    }

    /// Print the per-file status line.
    pub fn log(&self) {
        let name = display_name(&self.input);
        match &self.result {
            Ok(view_box) => {
                logger::status_success(&name);
                debug!("batch"; "{} [{}]", self.output.display(), view_box);
            }
            Err(err) => logger::status_error(&name, &err.to_string()),
        }
    }
}

/// File name only, falling back to the full path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Outcomes of a batch run, in enumeration order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    /// The first fatal error, if the run was aborted by one.
    pub fn fatal(&self) -> Option<&CropError> {
        self.outcomes
            .iter()
            .find(|o| o.is_fatal())
            .and_then(|o| o.result.as_ref().err())
    }

    pub fn summary(&self) -> String {
        let total = self.total();
        format!(
            "Successfully processed {}/{} file{}",
            self.succeeded(),
            total,
            if total == 1 { "" } else { "s" }
        )
    }
}

/// Crop every job and collect the outcomes.
///
/// Sequential runs log each file as it completes. Parallel runs process on
/// the rayon pool and log afterwards, still in job order.
pub fn run_batch(cropper: &Cropper<'_>, jobs: &[Job], parallel: bool) -> BatchReport {
    let process = |job: &Job| FileOutcome {
        input: job.input.clone(),
        output: job.output.clone(),
        result: cropper.crop_file(&job.input, &job.output),
    };

    let outcomes = if parallel {
        let outcomes: Vec<FileOutcome> = jobs.par_iter().map(process).collect();
        let end = outcomes
            .iter()
            .position(FileOutcome::is_fatal)
            .map_or(outcomes.len(), |i| i + 1);
        let mut outcomes = outcomes;
        outcomes.truncate(end);
        outcomes.iter().for_each(FileOutcome::log);
        outcomes
    } else {
        let mut outcomes = Vec::with_capacity(jobs.len());
        for job in jobs {
            let outcome = process(job);
            outcome.log();
            let fatal = outcome.is_fatal();
            outcomes.push(outcome);
            if fatal {
                break;
            }
        }
        outcomes
    };

    BatchReport { outcomes }
}
