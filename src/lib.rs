//! Drover - terminal front-end for an external bundler.
//!
//! Drover does no bundling of its own. It spawns a configured build engine,
//! consumes its compile-lifecycle events, and turns raw compile results into
//! a spinner-driven status report in the terminal. In one-shot mode it runs a
//! single production build; in dev mode it serves the engine's output
//! directory and keeps reporting across recompiles.
//!
//! # Architecture
//!
//! - [`engine`] - Build-engine abstraction and the subprocess-backed engine
//! - [`report`] - The reporting core: classifier, reporter, build session
//! - [`server`] - Thin static dev server over the engine's output directory
//! - [`error`] - Structured error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Terminal status messages and formatting helpers
//! - `commands` - Individual CLI command implementations
//! - `config` - Configuration file handling

// Public modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod logger;
pub mod report;
pub mod server;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, ConfigError, EngineError, Result, ResultExt};
