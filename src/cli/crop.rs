//! The crop command: single-file and batch runs.

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::{
    batch::{InputSpec, Job, batch_output, run_batch, single_output},
    config::CropConfig,
    debug,
    geometry::GeometryExtractor,
    log,
    pipeline::Cropper,
};

use super::{Cli, EXIT_FAILED, EXIT_SUCCESS};

/// Run the crop command with an already-resolved extractor.
///
/// Returns the process exit status.
pub fn run(cli: &Cli, config: &CropConfig, extractor: &dyn GeometryExtractor) -> Result<u8> {
    let spec = InputSpec::classify(&cli.input);
    let cropper = Cropper::new(extractor, config.crop_options());
    debug!("crop"; "input {:?}, options {:?}", spec, cropper.options());

    if cli.batch || spec.is_batch() {
        crop_batch(cli, config, &cropper, &spec)
    } else {
        crop_single(cli, config, &cropper, &PathBuf::from(&cli.input))
    }
}

fn crop_single(
    cli: &Cli,
    config: &CropConfig,
    cropper: &Cropper<'_>,
    input: &Path,
) -> Result<u8> {
    let output = single_output(input, cli.output.as_deref(), &config.output.suffix);

    match cropper.crop_file(input, &output) {
        Ok(view_box) => {
            log!("crop"; "saved {} (viewBox \"{}\")", output.display(), view_box);
            Ok(EXIT_SUCCESS)
        }
        Err(err) => {
            log!("error"; "failed to process {}: {}", input.display(), err);
            Ok(EXIT_FAILED)
        }
    }
}

fn crop_batch(
    cli: &Cli,
    config: &CropConfig,
    cropper: &Cropper<'_>,
    spec: &InputSpec,
) -> Result<u8> {
    let files = spec.enumerate()?;

    if let Some(dir) = &cli.output {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    if files.is_empty() {
        log!("warning"; "no SVG files matched {}", cli.input);
    } else {
        log!("batch"; "processing {} file{}", files.len(), if files.len() == 1 { "" } else { "s" });
    }

    let jobs: Vec<Job> = files
        .into_iter()
        .map(|input| Job {
            output: batch_output(&input, cli.output.as_deref(), &config.output.suffix),
            input,
        })
        .collect();

    let report = run_batch(cropper, &jobs, config.batch.parallel);

    if let Some(err) = report.fatal() {
        anyhow::bail!("batch aborted: {err}");
    }

    log!("batch"; "{}", report.summary());

    if config.batch.strict && report.has_failures() {
        return Ok(EXIT_FAILED);
    }
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::pipeline::tests::{FakeExtractor, RECT_SVG};
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("svgcrop").chain(args.iter().copied()))
    }

    fn fake() -> FakeExtractor {
        FakeExtractor {
            boxes: vec![Some(BoundingBox::new(20.0, 80.0, 20.0, 60.0))],
        }
    }

    fn run_args(args: &[&str], extractor: &dyn GeometryExtractor) -> u8 {
        let cli = cli(args);
        let config = CropConfig::load(&cli).unwrap();
        run(&cli, &config, extractor).unwrap()
    }

    fn write_icons(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), RECT_SVG).unwrap();
        }
    }

    fn s(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_single_default_output() {
        let temp = TempDir::new().unwrap();
        write_icons(temp.path(), &["home.svg"]);
        let input = temp.path().join("home.svg");

        let code = run_args(&[&s(&input), "-m", "raw"], &fake());
        assert_eq!(code, EXIT_SUCCESS);

        let written = fs::read_to_string(temp.path().join("home_cropped.svg")).unwrap();
        assert!(written.contains(r#"viewBox="20 20 60 40""#));
    }

    #[test]
    fn test_single_failure_exit_code() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("missing.svg");

        let code = run_args(&[&s(&input)], &fake());
        assert_eq!(code, EXIT_FAILED);
    }

    #[test]
    fn test_directory_batch_mirrors_names() {
        let temp = TempDir::new().unwrap();
        let icons = temp.path().join("icons");
        fs::create_dir(&icons).unwrap();
        write_icons(&icons, &["a.svg", "b.svg", "c.svg"]);
        let out = temp.path().join("out/nested");

        let code = run_args(&[&s(&icons), &s(&out)], &fake());
        assert_eq!(code, EXIT_SUCCESS);
        for name in ["a.svg", "b.svg", "c.svg"] {
            let written = fs::read_to_string(out.join(name)).unwrap();
            assert!(written.contains(r#"viewBox="20 10 60 60""#));
        }
    }

    #[test]
    fn test_glob_batch_without_output() {
        let temp = TempDir::new().unwrap();
        write_icons(temp.path(), &["a.svg", "b.svg"]);
        let pattern = s(&temp.path().join("*.svg"));

        let code = run_args(&[&pattern], &fake());
        assert_eq!(code, EXIT_SUCCESS);
        assert!(temp.path().join("a_cropped.svg").exists());
        assert!(temp.path().join("b_cropped.svg").exists());
    }

    #[test]
    fn test_batch_flag_with_single_file() {
        let temp = TempDir::new().unwrap();
        write_icons(temp.path(), &["one.svg"]);
        let out = temp.path().join("out");

        let code = run_args(&[&s(&temp.path().join("one.svg")), &s(&out), "-b"], &fake());
        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.join("one.svg").exists());
    }

    #[test]
    fn test_strict_batch() {
        let temp = TempDir::new().unwrap();
        let icons = temp.path().join("icons");
        fs::create_dir(&icons).unwrap();
        write_icons(&icons, &["good.svg"]);
        let out = s(&temp.path().join("out"));

        let empty = FakeExtractor { boxes: vec![] };
        let code = run_args(&[&s(&icons), &out], &empty);
        assert_eq!(code, EXIT_SUCCESS);

        let code = run_args(&[&s(&icons), &out, "--strict"], &empty);
        assert_eq!(code, EXIT_FAILED);
    }
}
