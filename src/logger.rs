//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted output with colored prefixes
//! - `debug!` macro gated on the global verbose flag
//! - `LiveLine` for the single-line terminal preview (native only)
//!
//! On `wasm32` messages go to the browser console instead of stdout.
//!
//! # Example
//!
//! ```ignore
//! log!("theme"; "applied {}", theme);
//! debug!("spy"; "scroll pos {}", pos);
//! ```

use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};

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
#[cfg(not(target_arch = "wasm32"))]
pub fn log(module: &str, message: &str) {
    use crossterm::{
        execute,
        terminal::{Clear, ClearType},
    };
    use std::io::{Write, stdout};

    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Log a message to the browser console
#[cfg(target_arch = "wasm32")]
pub fn log(module: &str, message: &str) {
    let line = format!("[{module}] {message}");
    web_sys::console::log_1(&line.into());
}

/// Apply color to a module prefix based on module type
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "page" => prefix.bright_blue().bold().to_string(),
        "preview" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Live Line (single-line status with overwrite)
// ============================================================================

/// Single-line display that overwrites itself on every update.
///
/// Used by the terminal preview to animate typewriter frames in place.
///
/// # Example
///
/// ```ignore
/// let mut line = LiveLine::new();
/// line.show("Passionate Java Dev");
/// line.finish();
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub struct LiveLine {
    dirty: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl LiveLine {
    pub const fn new() -> Self {
        Self { dirty: false }
    }

    /// Replace the current line content.
    pub fn show(&mut self, content: &str) {
        use crossterm::{
            cursor, execute,
            terminal::{Clear, ClearType},
        };
        use std::io::{Write, stdout};

        let mut stdout = stdout().lock();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        write!(stdout, "{content}").ok();
        stdout.flush().ok();
        self.dirty = true;
    }

    /// Keep the last content and move to the next line.
    pub fn finish(mut self) {
        use std::io::{Write, stdout};

        if self.dirty {
            writeln!(stdout()).ok();
            self.dirty = false;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for LiveLine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_contains_module_name() {
        assert!(colorize_prefix("theme", "theme").contains("[theme]"));
        assert!(colorize_prefix("Error", "error").contains("[Error]"));
    }

    #[test]
    fn test_live_line_new_is_clean() {
        let line = LiveLine::new();
        assert!(!line.dirty);
    }
}
