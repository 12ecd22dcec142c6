//! Document bounding box aggregation.
//!
//! Reduces the boxes of every path in a document to the one box that
//! encloses all visible content.

use super::BoundingBox;

/// Union all valid boxes, skipping `None` entries (degenerate paths).
///
/// # Returns
/// - `Some(BoundingBox)` - The combined box, seeded from the first valid entry
/// - `None` - If the input is empty or every entry failed
pub fn aggregate<I>(boxes: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = Option<BoundingBox>>,
{
    boxes.into_iter().flatten().fold(None, merge_bounds)
}

/// Merge a box into an optional running union
fn merge_bounds(acc: Option<BoundingBox>, next: BoundingBox) -> Option<BoundingBox> {
    match acc {
        Some(existing) => Some(existing.union(&next)),
        None => Some(next),
    }
}
