//! Path geometry and bounding boxes.
//!
//! # Modules
//!
//! - [`bounds`]: Union of per-path bounding boxes into one document box
//! - [`extract`]: usvg-backed extraction of path geometry from SVG files
//!
//! The pipeline never talks to usvg directly: it receives a
//! [`GeometryExtractor`] so that tests (and alternative backends) can
//! supply their own geometry.

mod bounds;
#[cfg(feature = "geometry")]
mod extract;

pub use bounds::aggregate;
#[cfg(feature = "geometry")]
pub use extract::UsvgExtractor;

use std::path::Path;

use crate::error::CropError;

/// Axis-aligned bounding box in document user-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f32,
    pub xmax: f32,
    pub ymin: f32,
    pub ymax: f32,
}

impl BoundingBox {
    /// Build a box from its extremes, normalizing swapped bounds.
    pub fn new(xmin: f32, xmax: f32, ymin: f32, ymax: f32) -> Self {
        Self {
            xmin: xmin.min(xmax),
            xmax: xmin.max(xmax),
            ymin: ymin.min(ymax),
            ymax: ymin.max(ymax),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    /// Center point `(x, y)` of the box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (
            self.xmin + self.width() / 2.0,
            self.ymin + self.height() / 2.0,
        )
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            xmin: self.xmin.min(other.xmin),
            xmax: self.xmax.max(other.xmax),
            ymin: self.ymin.min(other.ymin),
            ymax: self.ymax.max(other.ymax),
        }
    }
}

/// A single piece of path geometry whose extent can be measured.
pub trait PathGeometry: Send {
    /// Bounding box in user space, or `None` for degenerate geometry.
    fn bbox(&self) -> Option<BoundingBox>;
}

impl PathGeometry for BoundingBox {
    fn bbox(&self) -> Option<BoundingBox> {
        Some(*self)
    }
}

impl PathGeometry for Option<BoundingBox> {
    fn bbox(&self) -> Option<BoundingBox> {
        *self
    }
}

/// Source of path geometry for a file on disk.
pub trait GeometryExtractor: Send + Sync {
    /// Extract every visible path of `source`.
    ///
    /// An empty result means the document has no path-like content.
    fn extract(&self, source: &Path) -> Result<Vec<Box<dyn PathGeometry>>, CropError>;
}

/// The extractor compiled into this binary.
///
/// # Errors
/// `CropError::MissingCapability` when built without the `geometry` feature.
pub fn default_extractor() -> Result<Box<dyn GeometryExtractor>, CropError> {
    #[cfg(feature = "geometry")]
    {
        Ok(Box::new(UsvgExtractor::default()))
    }
    #[cfg(not(feature = "geometry"))]
    {
        Err(CropError::MissingCapability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_swapped_bounds() {
        let bbox = BoundingBox::new(80.0, 20.0, 60.0, 20.0);
        assert_eq!(bbox, BoundingBox::new(20.0, 80.0, 20.0, 60.0));
        assert_eq!(bbox.width(), 60.0);
        assert_eq!(bbox.height(), 40.0);
    }

    #[test]
    fn test_center() {
        let bbox = BoundingBox::new(20.0, 80.0, 20.0, 60.0);
        assert_eq!(bbox.center(), (50.0, 40.0));
    }

    #[test]
    fn test_union_encloses_both() {
        let a = BoundingBox::new(0.0, 10.0, 5.0, 6.0);
        let b = BoundingBox::new(-3.0, 4.0, 0.0, 20.0);
        assert_eq!(a.union(&b), BoundingBox::new(-3.0, 10.0, 0.0, 20.0));
    }

    #[cfg(feature = "geometry")]
    #[test]
    fn test_default_extractor_available() {
        assert!(default_extractor().is_ok());
    }
}
