//! Per-file crop pipeline.
//!
//! ```text
//! input.svg ──► extract ──► aggregate ──► viewBox ──► rewrite ──► output.svg
//! ```

use std::path::Path;

use crate::{
    debug,
    error::CropError,
    geometry::{BoundingBox, GeometryExtractor, aggregate},
    rewrite::rewrite_file,
    viewbox::{CropOptions, ViewBoxRect},
};

/// Crops files with a fixed extractor and options.
pub struct Cropper<'a> {
    extractor: &'a dyn GeometryExtractor,
    options: CropOptions,
}

impl<'a> Cropper<'a> {
    pub fn new(extractor: &'a dyn GeometryExtractor, options: CropOptions) -> Self {
        Self { extractor, options }
    }

    pub fn options(&self) -> &CropOptions {
        &self.options
    }

    /// Document bounding box of `input`.
    ///
    /// Paths whose box cannot be computed are skipped; a file left with no
    /// usable path is `CropError::NoContent`.
    pub fn bounding_box(&self, input: &Path) -> Result<BoundingBox, CropError> {
        let paths = self.extractor.extract(input)?;
        let total = paths.len();

        let boxes: Vec<_> = paths.iter().map(|path| path.bbox()).collect();
        let skipped = boxes.iter().filter(|b| b.is_none()).count();
        if skipped > 0 {
            debug!("crop"; "{}: skipped {}/{} degenerate path(s)", input.display(), skipped, total);
        }

        aggregate(boxes).ok_or_else(|| CropError::NoContent(input.into()))
    }

    /// Compute the new viewBox for `input` without writing anything.
    pub fn view_box(&self, input: &Path) -> Result<ViewBoxRect, CropError> {
        let bbox = self.bounding_box(input)?;
        ViewBoxRect::compute(&bbox, &self.options)
            .ok_or_else(|| CropError::DegenerateViewBox(input.into()))
    }

    /// Crop `input` into `output` and return the viewBox written.
    pub fn crop_file(&self, input: &Path, output: &Path) -> Result<ViewBoxRect, CropError> {
        let view_box = self.view_box(input)?;
        rewrite_file(input, output, &view_box)?;
        debug!("crop"; "{} -> {} [{}]", input.display(), output.display(), view_box);
        Ok(view_box)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::geometry::PathGeometry;
    use crate::viewbox::CropMode;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Extractor returning fixed boxes for any file that exists.
    pub(crate) struct FakeExtractor {
        pub boxes: Vec<Option<BoundingBox>>,
    }

    impl GeometryExtractor for FakeExtractor {
        fn extract(&self, source: &Path) -> Result<Vec<Box<dyn PathGeometry>>, CropError> {
            if !source.exists() {
                return Err(CropError::Io(
                    source.to_path_buf(),
                    std::io::Error::from(std::io::ErrorKind::NotFound),
                ));
            }
            Ok(self
                .boxes
                .iter()
                .map(|b| Box::new(*b) as Box<dyn PathGeometry>)
                .collect())
        }
    }

    pub(crate) const RECT_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100">
  <path d="M20 20 H80 V60 H20 Z"/>
</svg>
"#;

    fn write_input(temp: &TempDir) -> PathBuf {
        let input = temp.path().join("icon.svg");
        fs::write(&input, RECT_SVG).unwrap();
        input
    }

    fn options(padding: f32, mode: CropMode) -> CropOptions {
        CropOptions { padding, mode }
    }

    #[test]
    fn test_bounding_box_skips_failed_paths() {
        let temp = TempDir::new().unwrap();
        let input = write_input(&temp);
        let extractor = FakeExtractor {
            boxes: vec![
                None,
                Some(BoundingBox::new(20.0, 80.0, 20.0, 60.0)),
                None,
            ],
        };

        let bbox = Cropper::new(&extractor, CropOptions::default())
            .bounding_box(&input)
            .unwrap();
        assert_eq!(bbox, BoundingBox::new(20.0, 80.0, 20.0, 60.0));
    }

    #[test]
    fn test_no_content_when_every_path_fails() {
        let temp = TempDir::new().unwrap();
        let input = write_input(&temp);

        for boxes in [vec![], vec![None, None]] {
            let extractor = FakeExtractor { boxes };
            let err = Cropper::new(&extractor, CropOptions::default())
                .crop_file(&input, &temp.path().join("out.svg"))
                .unwrap_err();
            assert!(matches!(err, CropError::NoContent(_)));
        }
        assert!(!temp.path().join("out.svg").exists());
    }

    #[test]
    fn test_degenerate_view_box() {
        let temp = TempDir::new().unwrap();
        let input = write_input(&temp);
        let extractor = FakeExtractor {
            boxes: vec![Some(BoundingBox::new(5.0, 5.0, 5.0, 5.0))],
        };

        let err = Cropper::new(&extractor, options(0.0, CropMode::Raw))
            .view_box(&input)
            .unwrap_err();
        assert!(matches!(err, CropError::DegenerateViewBox(_)));
    }

    #[test]
    fn test_crop_file_with_fake_extractor() {
        let temp = TempDir::new().unwrap();
        let input = write_input(&temp);
        let output = temp.path().join("out.svg");
        let extractor = FakeExtractor {
            boxes: vec![Some(BoundingBox::new(20.0, 80.0, 20.0, 60.0))],
        };

        let view_box = Cropper::new(&extractor, options(0.0, CropMode::Square))
            .crop_file(&input, &output)
            .unwrap();
        assert_eq!(view_box.to_string(), "20 10 60 60");

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains(r#"viewBox="20 10 60 60""#));
        assert!(!written.contains("width="));
        assert!(!written.contains("height="));
    }

    #[cfg(feature = "geometry")]
    mod usvg_backed {
        use super::*;
        use crate::geometry::UsvgExtractor;

        #[test]
        fn test_example_raw_and_square() {
            let temp = TempDir::new().unwrap();
            let input = write_input(&temp);
            let extractor = UsvgExtractor::default();

            let raw = Cropper::new(&extractor, options(0.0, CropMode::Raw))
                .crop_file(&input, &temp.path().join("raw.svg"))
                .unwrap();
            assert_eq!(raw.to_string(), "20 20 60 40");

            let square = Cropper::new(&extractor, options(0.0, CropMode::Square))
                .crop_file(&input, &temp.path().join("square.svg"))
                .unwrap();
            assert_eq!(square.to_string(), "20 10 60 60");
        }

        #[test]
        fn test_raw_padding() {
            let temp = TempDir::new().unwrap();
            let input = write_input(&temp);
            let extractor = UsvgExtractor::default();

            let view_box = Cropper::new(&extractor, options(4.0, CropMode::Raw))
                .view_box(&input)
                .unwrap();
            assert_eq!(view_box.to_string(), "16 16 68 48");
        }

        #[test]
        fn test_recrop_is_idempotent() {
            let temp = TempDir::new().unwrap();
            let input = write_input(&temp);
            let first = temp.path().join("first.svg");
            let second = temp.path().join("second.svg");
            let extractor = UsvgExtractor::default();
            let cropper = Cropper::new(&extractor, options(0.0, CropMode::Raw));

            let a = cropper.crop_file(&input, &first).unwrap();
            let b = cropper.crop_file(&first, &second).unwrap();
            assert_eq!(a, b);
            assert_eq!(b.to_string(), "20 20 60 40");
        }

        #[test]
        fn test_unparsable_file() {
            let temp = TempDir::new().unwrap();
            let input = temp.path().join("broken.svg");
            fs::write(&input, "<svg xmlns=\"http://www.w3.org/2000/svg\"><g></svg>").unwrap();

            let extractor = UsvgExtractor::default();
            let err = Cropper::new(&extractor, CropOptions::default())
                .crop_file(&input, &temp.path().join("out.svg"))
                .unwrap_err();
            assert!(matches!(err, CropError::Parse { .. }));
        }
    }
}
