//! Terminal UI utilities for status messages and formatted output.
//!
//! This module provides the command-level terminal output helpers: status
//! message functions, duration formatting, and environment detection (CI,
//! TTY). The compile-status spinner lives in [`crate::report`]; these helpers
//! cover everything around it.

// Submodules
mod format;
mod messages;

// Re-exports for convenient access
pub use format::format_duration;
pub use messages::{error, info, success, warning};

/// Check if running in a CI environment.
///
/// Detects common CI environment variables from GitHub Actions, GitLab CI,
/// CircleCI, and Travis CI.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    // NO_COLOR environment variable disables colors
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // FORCE_COLOR enables colors even in non-TTY
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Check if stderr is a terminal
    console::user_attended_stderr()
}

/// Initialize color support based on environment.
///
/// Should be called early in the application lifecycle (e.g., in main).
/// The `owo-colors` crate automatically respects NO_COLOR and terminal
/// capabilities; this function performs validation and can be extended for
/// custom logic.
pub fn init_colors() {
    let _ = should_use_color();
}
