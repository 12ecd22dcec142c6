//! Input enumeration and output path resolution.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// What the user pointed the tool at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// A single file.
    File(PathBuf),
    /// Every `*.svg` directly inside a directory.
    Dir(PathBuf),
    /// A filesystem glob pattern.
    Glob(String),
}

impl InputSpec {
    /// Classify a raw input argument.
    ///
    /// Anything containing glob metacharacters is a pattern, an existing
    /// directory is a directory, everything else is treated as a file.
    pub fn classify(input: &str) -> Self {
        if input.contains(['*', '?', '[']) {
            return Self::Glob(input.to_string());
        }
        let path = PathBuf::from(input);
        if path.is_dir() {
            Self::Dir(path)
        } else {
            Self::File(path)
        }
    }

    /// Whether this input implies batch processing.
    pub fn is_batch(&self) -> bool {
        !matches!(self, Self::File(_))
    }

    /// List the files to process, sorted.
    pub fn enumerate(&self) -> Result<Vec<PathBuf>> {
        match self {
            Self::File(path) => Ok(vec![path.clone()]),
            Self::Dir(dir) => collect_svg_files(dir),
            Self::Glob(pattern) => expand_glob(pattern),
        }
    }
}

/// Non-recursive `*.svg` listing of `dir`, sorted by path.
fn collect_svg_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "svg"))
        .collect();
    files.sort();
    Ok(files)
}

/// Expand a glob pattern to regular files, sorted by path.
fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let matches =
        glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;

    let mut files = Vec::new();
    for entry in matches {
        let path = entry.with_context(|| "Failed to read glob entry")?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// ============================================================================
// Output resolution
// ============================================================================

/// `<stem><suffix>.<ext>` next to `input`.
pub fn derived_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    input.with_file_name(name)
}

/// Output path for a single-file run.
///
/// An existing directory receives the input's file name.
pub fn single_output(input: &Path, output: Option<&Path>, suffix: &str) -> PathBuf {
    match output {
        Some(dir) if dir.is_dir() => mirror_into(input, dir),
        Some(file) => file.to_path_buf(),
        None => derived_output(input, suffix),
    }
}

/// Output path for one file of a batch run.
pub fn batch_output(input: &Path, output_dir: Option<&Path>, suffix: &str) -> PathBuf {
    match output_dir {
        Some(dir) => mirror_into(input, dir),
        None => derived_output(input, suffix),
    }
}

#[inline]
fn mirror_into(input: &Path, dir: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => dir.join(name),
        None => dir.to_path_buf(),
    }
}
