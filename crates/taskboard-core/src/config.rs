//! Layered configuration loading using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`TASKBOARD_*` prefix, `__` as separator)
//! 2. A TOML file (explicit path, or `taskboard.toml` in the working directory)
//! 3. Built-in defaults
//!
//! `TASKBOARD_ENGINE__PERSIST_DERIVED=false` maps to `engine.persist_derived`.
//! `TASKBOARD_LOG` is left to the CLI's log filter.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "taskboard.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskboardConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Behaviour of [`crate::app::StatusEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Write the derived progress back to the board on every activation.
    /// Off for read-only dashboards that only need the partition.
    #[serde(default = "default_true")]
    pub persist_derived: bool,

    /// Skip a write whose value equals the last value this engine wrote for
    /// the same board.
    #[serde(default)]
    pub skip_unchanged_writes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            persist_derived: true,
            skip_unchanged_writes: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `TASKBOARD_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_filter() -> String {
    "info".to_string()
}

impl TaskboardConfig {
    /// Load from defaults, the TOML file, and the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path
            && !path.exists()
        {
            return Err(ConfigError::InvalidValue {
                field: "config".to_string(),
                reason: format!("file not found: {}", path.display()),
            });
        }
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the provider chain. Public so tests can layer extra providers.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }

        // `TASKBOARD_LOG` is the CLI's `EnvFilter` variable, not a config key.
        figment.merge(Env::prefixed("TASKBOARD_").ignore(&["log"]).split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log.filter".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
