//! Per-file crop errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::rewrite::RewriteError;

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// CropError
// ============================================================================

/// Errors raised while cropping a single file.
///
/// Everything except [`CropError::MissingCapability`] is scoped to one file:
/// the batch driver records it and moves on to the next input.
#[derive(Debug, Error)]
pub enum CropError {
    #[cfg_attr(feature = "geometry", allow(dead_code))]
    #[error("path geometry extraction is unavailable (built without the `geometry` feature)")]
    MissingCapability,

    #[error("no usable path geometry in `{0}`")]
    NoContent(PathBuf),

    #[error("failed to parse `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },

    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("computed viewBox for `{0}` has no area")]
    DegenerateViewBox(PathBuf),
}

impl CropError {
    pub fn parse(path: impl Into<PathBuf>, source: impl Into<BoxedError>) -> Self {
        Self::Parse {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Map a rewriter failure onto the file it happened in.
    pub fn from_rewrite(path: impl Into<PathBuf>, err: RewriteError) -> Self {
        match err {
            RewriteError::Io(io) => Self::Io(path.into(), io),
            other => Self::parse(path, other),
        }
    }

    /// Whether this error must stop the whole run instead of one file.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingCapability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_crop_error_display() {
        let err = CropError::Io(
            PathBuf::from("icon.svg"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("icon.svg"));

        let err = CropError::NoContent(PathBuf::from("empty.svg"));
        assert!(format!("{err}").contains("empty.svg"));
    }

    #[test]
    fn test_parse_error_includes_source() {
        let err = CropError::parse("broken.svg", "unexpected end of document");
        let display = format!("{err}");
        assert!(display.contains("broken.svg"));
        assert!(display.contains("unexpected end of document"));
    }

    #[test]
    fn test_only_missing_capability_is_fatal() {
        assert!(CropError::MissingCapability.is_fatal());
        assert!(!CropError::NoContent(PathBuf::from("a.svg")).is_fatal());
        assert!(!CropError::DegenerateViewBox(PathBuf::from("a.svg")).is_fatal());
    }

    #[test]
    fn test_from_rewrite_keeps_io_kind() {
        let io = Error::new(ErrorKind::PermissionDenied, "denied");
        let err = CropError::from_rewrite("out.svg", RewriteError::Io(io));
        assert!(matches!(err, CropError::Io(_, _)));

        let err = CropError::from_rewrite("in.svg", RewriteError::MissingRoot);
        assert!(matches!(err, CropError::Parse { .. }));
    }
}
