//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output only shown with `--verbose`
//! - per-file status lines (`✓` / `✗`) for batch runs
//!
//! # Example
//!
//! ```ignore
//! log!("batch"; "processing {} files", count);
//! debug!("crop"; "{} -> {}", input.display(), output.display());
//! ```

use owo_colors::{OwoColorize, Stream};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let paint = |text: &String| match module_lower {
        "crop" => text.bright_blue().bold().to_string(),
        "batch" => text.bright_green().bold().to_string(),
        "error" => text.bright_red().bold().to_string(),
        _ => text.bright_yellow().bold().to_string(),
    };
    prefix.if_supports_color(Stream::Stdout, paint).to_string()
}

// ============================================================================
// File Status
// ============================================================================

/// Format a per-file status line.
///
/// `✓ name` on success, `✗ name: detail` on failure.
fn status_line(ok: bool, name: &str, detail: &str) -> String {
    let check = "✓".if_supports_color(Stream::Stdout, |t| t.green());
    let cross = "✗".if_supports_color(Stream::Stdout, |t| t.red());
    if ok {
        format!("{check} {name}")
    } else if detail.is_empty() {
        format!("{cross} {name}")
    } else {
        let detail = detail.if_supports_color(Stream::Stdout, |t| t.dimmed());
        format!("{cross} {name}: {detail}")
    }
}

/// Report a processed file.
pub fn status_success(name: &str) {
    log("batch", &status_line(true, name, ""));
}

/// Report a skipped file with the reason.
pub fn status_error(name: &str, detail: &str) {
    log("batch", &status_line(false, name, detail));
}

// ============================================================================
// Tests
// ============================================================================
