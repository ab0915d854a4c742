//! Copier configuration
//!
//! Configuration is layered with figment: defaults, then an optional TOML
//! file, then `COPIER_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orchestrator::ReleasePolicy;

/// Default write buffer for file writers
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "COPIER_";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong shape
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A value was well-formed but not acceptable
    #[error("Invalid configuration value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// Settings for a copy orchestrator and its file writer
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CopierConfig {
    /// Release policy used by the orchestrator
    #[serde(default)]
    pub policy: ReleasePolicy,
    /// Directory relative file names are resolved against
    pub output_dir: PathBuf,
    /// Write buffer size in bytes
    pub buffer_capacity: usize,
    /// Whether closing a file writer also syncs it to disk
    pub sync_on_close: bool,
}

impl Default for CopierConfig {
    fn default() -> Self {
        Self {
            policy: ReleasePolicy::default(),
            output_dir: PathBuf::from("."),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            sync_on_close: true,
        }
    }
}

impl CopierConfig {
    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "buffer_capacity".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Loads [`CopierConfig`] from its layered sources
#[derive(Debug, Default, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader reading defaults and the environment only
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader that also reads the TOML file at `path` when it exists
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// The configured file path, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load with priority: ENV > File > Defaults
    pub fn load(&self) -> Result<CopierConfig, ConfigError> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(CopierConfig::default()));

        // Layer 2: Config file (if exists)
        if let Some(path) = &self.config_path
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: CopierConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }
}
