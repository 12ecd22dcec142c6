//! Command-line interface module.

mod args;
pub mod crop;

pub use args::Cli;

pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for startup errors: missing geometry capability, bad
/// arguments or an invalid config.
pub const EXIT_ERROR: u8 = 1;

/// Exit status when a single-file run (or a `--strict` batch) fails.
pub const EXIT_FAILED: u8 = 2;
