//! Configuration for drover.
//!
//! Layered loading (defaults < `drover.config.json` < `DROVER_*` env < CLI
//! flags) lives in [`loading`]; this module holds the types. Unknown
//! dev-server options are carried through untouched for the engine's
//! benefit, never validated here.

mod loading;

pub use loading::CliOverrides;

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level drover configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DroverConfig {
    /// External build engine to drive
    pub engine: EngineConfig,
    /// Directory the engine writes output to; served in dev mode
    pub out_dir: PathBuf,
    /// Dev-server options
    pub dev_server: DevServerOptions,
}

impl Default for DroverConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            out_dir: PathBuf::from("dist"),
            dev_server: DevServerOptions::default(),
        }
    }
}

impl DroverConfig {
    /// Validate the merged configuration.
    pub fn validate(&self) -> Result<()> {
        if self.engine.command.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "engine.command".to_string(),
                value: self.engine.command.clone(),
                hint: "Set the bundler executable to run, e.g. \"webpack\"".to_string(),
            }
            .into());
        }
        if self.dev_server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "devServer.port".to_string(),
                value: "0".to_string(),
                hint: "Port must be between 1 and 65535".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// The external bundler command and its invocation arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Executable to run
    pub command: String,
    /// Arguments for a one-shot production build
    pub args: Vec<String>,
    /// Arguments for watch mode
    pub watch_args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: "webpack".to_string(),
            args: vec!["--json".to_string()],
            watch_args: vec!["--watch".to_string(), "--json".to_string()],
        }
    }
}

/// Dev-server options.
///
/// `extra` captures any additional keys from the config file; they are
/// passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevServerOptions {
    /// Host to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Open the browser once the server is listening
    pub open: bool,
    /// Unrecognized options, preserved as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for DevServerOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9999,
            open: false,
            extra: serde_json::Map::new(),
        }
    }
}
