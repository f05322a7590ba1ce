//! Error handling for the drover CLI.
//!
//! Hierarchical error types built on `thiserror`. Compile errors and warnings
//! from the build engine are *not* represented here: they are expected
//! outcomes, rendered by the build session and never raised. This module only
//! covers failures of the orchestration itself (bad configuration, an engine
//! that cannot run, a dev server that cannot bind).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
///
/// Automatically converts from domain-specific errors via `From`
/// implementations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The build engine itself failed to run (distinct from compile errors)
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// A one-shot build finished with compile errors.
    ///
    /// The detailed report has already been rendered by the build session;
    /// this variant only carries the count so the process exits nonzero.
    #[error("Compilation failed with {count} error(s)")]
    BuildFailed {
        /// Number of errors the engine reported
        count: usize,
    },

    /// Development server errors
    #[error("Server error: {0}")]
    Server(String),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file doesn't exist at the expected location
    #[error("Config file not found: {}\n\nHint: Create a drover.config.json file or specify --config <path>", .0.display())]
    NotFound(PathBuf),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// I/O error while reading config
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Build-engine errors.
///
/// These cover the engine process failing to run at all, not compile errors
/// it reports. A result with compile errors is a *successful* engine run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine executable could not be spawned
    #[error("Failed to launch build engine '{command}': {source}\n\nHint: Check that the engine command is installed and on PATH")]
    Spawn {
        /// The command that failed to launch
        command: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The engine process exited without producing a compile result
    #[error("Build engine terminated without a compile result:\n{0}")]
    Crashed(String),

    /// The engine produced output drover could not understand
    #[error("Unreadable output from build engine: {0}")]
    Protocol(String),

    /// I/O error while talking to the engine process
    #[error("Build engine I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Add a helpful hint to the error context.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }
}

/// Convert a `CliError` to a miette `Report` for terminal rendering.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Engine(e) => miette::miette!("{}", e),
        other => miette::miette!("{}", other),
    }
}
