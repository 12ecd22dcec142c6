//! Run configuration.
//!
//! Settings come from an optional TOML file (`--config`) and are then
//! overridden by command-line flags.
//!
//! # Example
//!
//! ```toml
//! [crop]
//! padding = 2.0       # margin kept around the content (user-space units)
//! mode = "square"     # raw | square
//!
//! [output]
//! suffix = "_cropped" # appended to the file stem when no output is given
//!
//! [batch]
//! parallel = false    # process files on all cores
//! strict = false      # exit with status 2 when any file fails
//! ```

mod error;

pub use error::ConfigError;

use crate::{
    cli::Cli,
    log,
    viewbox::{CropMode, CropOptions},
};
use serde::Deserialize;
use std::{fs, path::Path};

/// Default suffix for derived output names.
pub const DEFAULT_SUFFIX: &str = "_cropped";

// ============================================================================
// Sections
// ============================================================================

/// `[crop]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CropSection {
    pub padding: f32,
    pub mode: CropMode,
}

impl Default for CropSection {
    fn default() -> Self {
        Self {
            padding: 0.0,
            mode: CropMode::Square,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub suffix: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// `[batch]` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatchSection {
    pub parallel: bool,
    pub strict: bool,
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub crop: CropSection,
    pub output: OutputSection,
    pub batch: BatchSection,
}

impl CropConfig {
    /// Load the config file named by the CLI (if any) and apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Command-line flags win over file values.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(padding) = cli.padding {
            self.crop.padding = padding;
        }
        if let Some(mode) = cli.mode {
            self.crop.mode = mode;
        }
        if let Some(suffix) = &cli.suffix {
            self.output.suffix = suffix.clone();
        }
        self.batch.parallel |= cli.parallel;
        self.batch.strict |= cli.strict;
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let padding = self.crop.padding;
        if !padding.is_finite() {
            return Err(ConfigError::Validation(format!(
                "crop.padding must be a finite number, got {padding}"
            )));
        }
        if padding < 0.0 {
            log!("warning"; "negative padding {} crops into the content", padding);
        }

        let suffix = &self.output.suffix;
        if suffix.is_empty() {
            return Err(ConfigError::Validation(
                "output.suffix must not be empty".to_string(),
            ));
        }
        if suffix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "output.suffix must not contain path separators, got `{suffix}`"
            )));
        }
        Ok(())
    }

    /// Options handed to the crop pipeline.
    pub fn crop_options(&self) -> CropOptions {
        CropOptions {
            padding: self.crop.padding,
            mode: self.crop.mode,
        }
    }
}
