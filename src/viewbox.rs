//! viewBox calculation.
//!
//! Turns the document bounding box into the rectangle written back to the
//! root `viewBox`, under one of two policies:
//!
//! - [`CropMode::Raw`]: the tight box grown by the padding on every side
//! - [`CropMode::Square`]: the padded box widened to a square centered on
//!   the content

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::geometry::BoundingBox;

/// viewBox policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    /// Tight crop plus padding, keeping the content's aspect ratio.
    Raw,
    /// Padded crop expanded to a square centered on the content.
    #[default]
    Square,
}

/// Per-run pipeline options.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CropOptions {
    /// Margin kept around the content, in user-space units.
    pub padding: f32,
    pub mode: CropMode,
}

/// The `x y width height` rectangle of a viewBox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBoxRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBoxRect {
    /// Compute the viewBox for `bbox` under `options`.
    ///
    /// Returns `None` when the result has no area (for example a single point
    /// without padding, or negative padding larger than the content).
    pub fn compute(bbox: &BoundingBox, options: &CropOptions) -> Option<Self> {
        let padding = options.padding;
        let rect = match options.mode {
            CropMode::Raw => Self {
                x: bbox.xmin - padding,
                y: bbox.ymin - padding,
                width: bbox.width() + 2.0 * padding,
                height: bbox.height() + 2.0 * padding,
            },
            CropMode::Square => {
                let content_width = bbox.width() + 2.0 * padding;
                let content_height = bbox.height() + 2.0 * padding;
                let size = content_width.max(content_height);
                let (cx, cy) = bbox.center();
                Self {
                    x: cx - size / 2.0,
                    y: cy - size / 2.0,
                    width: size,
                    height: size,
                }
            }
        };

        rect.has_area().then_some(rect)
    }

    fn has_area(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

impl fmt::Display for ViewBoxRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// Error parsing a viewBox attribute value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid viewBox `{0}`")]
pub struct ParseViewBoxError(String);

impl FromStr for ViewBoxRect {
    type Err = ParseViewBoxError;

    /// Parse `x y width height`, separated by whitespace and/or commas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseViewBoxError(s.to_owned());

        let values = s
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        let &[x, y, width, height] = values.as_slice() else {
            return Err(invalid());
        };

        let rect = Self {
            x,
            y,
            width,
            height,
        };
        if rect.has_area() { Ok(rect) } else { Err(invalid()) }
    }
}
