// Linkshelf engine configuration
// Loaded from an optional JSON file, then overridden by environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::errors::ConfigError;

pub const ENV_DATA_DIR: &str = "LINKSHELF_DATA_DIR";
pub const ENV_BUSY_TIMEOUT_MS: &str = "LINKSHELF_BUSY_TIMEOUT_MS";
pub const ENV_LOG: &str = "LINKSHELF_LOG";

/// Runtime settings for the engine and the RPC binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub data_dir: PathBuf,
    pub db_file: String,
    /// How long a writer waits on a locked database before failing.
    pub busy_timeout_ms: u64,
    /// `tracing-subscriber` filter directive, e.g. `info` or `linkshelf=debug`.
    pub log_filter: String,
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            db_file: "linkshelf.db".to_string(),
            busy_timeout_ms: 5000,
            log_filter: "info".to_string(),
            default_page_size: 50,
            max_page_size: 500,
        }
    }
}

impl EngineConfig {
    /// Loads the config file at `path` if given and present, applies
    /// environment overrides and validates the result.
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if p.exists() => {
                let content = fs::read_to_string(p).map_err(|e| {
                    ConfigError::IoError(format!("Failed to read config file: {}", e))
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
                })?
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_BUSY_TIMEOUT_MS) {
            self.busy_timeout_ms = raw.trim().parse().map_err(|_| {
                ConfigError::InvalidValue(format!("{} must be an integer: {}", ENV_BUSY_TIMEOUT_MS, raw))
            })?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size <= 0 || self.max_page_size <= 0 {
            return Err(ConfigError::InvalidValue(
                "page sizes must be positive".to_string(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidValue(format!(
                "default_page_size {} exceeds max_page_size {}",
                self.default_page_size, self.max_page_size
            )));
        }
        if self.db_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue("db_file is empty".to_string()));
        }
        Ok(())
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    /// Resolves a caller-supplied page size: missing or non-positive uses the
    /// default, anything above the maximum is capped.
    pub fn clamp_limit(&self, limit: Option<i64>) -> i64 {
        match limit {
            Some(l) if l > 0 => l.min(self.max_page_size),
            _ => self.default_page_size,
        }
    }
}
