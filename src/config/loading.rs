use crate::config::DroverConfig;
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    value::{Uncased, UncasedStr},
    Figment,
};
use std::path::{Path, PathBuf};

/// CLI flags that override the merged file/env configuration.
///
/// Only set fields override; `None` leaves the lower layers untouched.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub engine_command: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub open: bool,
}

impl CliOverrides {
    fn apply(&self, config: &mut DroverConfig) {
        if let Some(command) = &self.engine_command {
            config.engine.command = command.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        if let Some(host) = &self.host {
            config.dev_server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.dev_server.port = port;
        }
        if self.open {
            config.dev_server.open = true;
        }
    }
}

impl DroverConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// An explicitly passed config path must exist; the implicit
    /// `drover.config.json` is optional.
    pub fn load(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(DroverConfig::default()));

        let config_file = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()).into());
                }
                Some(path.to_path_buf())
            }
            None => {
                let default_path = Path::new("drover.config.json");
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            figment = figment.merge(Json::file(path));
        }

        // Merge DROVER_-prefixed environment variables. '__' nests,
        // '_' camel-cases within a segment, so the keys line up with the
        // serde names: DROVER_ENGINE__COMMAND -> engine.command,
        // DROVER_DEV_SERVER__PORT -> devServer.port, DROVER_OUT_DIR -> outDir.
        figment = figment.merge(Env::prefixed("DROVER_").map(env_key).split("__"));

        let mut config: DroverConfig = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            value: e.to_string(),
            hint: "Check drover.config.json syntax and field types".to_string(),
        })?;

        overrides.apply(&mut config);
        Ok(config)
    }
}

/// Translate an env key to the camelCase config key, preserving the `__`
/// nesting separator for the provider to split on.
fn env_key(key: &UncasedStr) -> Uncased<'_> {
    let mapped = key
        .as_str()
        .split("__")
        .map(camelize)
        .collect::<Vec<_>>()
        .join("__");
    Uncased::from(mapped)
}

/// `DEV_SERVER` -> `devServer`, `OUT_DIR` -> `outDir`, `ENGINE` -> `engine`.
fn camelize(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut upper_next = false;
    for c in segment.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}
