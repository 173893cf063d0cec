//! Top-level Stride configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{MiningConfig, StorageConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`STRIDE_*`)
/// 2. Project config (`stride.toml` in project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StrideConfig {
    pub mining: MiningConfig,
    pub storage: StorageConfig,
}

impl StrideConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("stride.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &StrideConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.mining.support_threshold {
            if !(threshold > 0.0 && threshold <= 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "mining.support_threshold".to_string(),
                    message: "must be greater than 0.0 and at most 1.0".to_string(),
                });
            }
        }
        if let Some(limit) = config.mining.continuation_limit {
            if limit == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "mining.continuation_limit".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(ref mode) = config.mining.support_mode {
            if mode != "absolute" && mode != "relative" {
                return Err(ConfigError::InvalidValue {
                    field: "mining.support_mode".to_string(),
                    message: format!("expected \"absolute\" or \"relative\", got \"{mode}\""),
                });
            }
        }
        if let Some(size) = config.storage.read_pool_size {
            if size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut StrideConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: StrideConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut StrideConfig, other: &StrideConfig) {
        if other.mining.continuation_limit.is_some() {
            base.mining.continuation_limit = other.mining.continuation_limit;
        }
        if other.mining.support_threshold.is_some() {
            base.mining.support_threshold = other.mining.support_threshold;
        }
        if other.mining.support_mode.is_some() {
            base.mining.support_mode = other.mining.support_mode.clone();
        }
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `STRIDE_CONTINUATION_LIMIT`, `STRIDE_SUPPORT_THRESHOLD`, etc.
    fn apply_env_overrides(config: &mut StrideConfig) {
        if let Ok(val) = std::env::var("STRIDE_CONTINUATION_LIMIT") {
            if let Ok(v) = val.parse::<u32>() {
                config.mining.continuation_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STRIDE_SUPPORT_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.mining.support_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STRIDE_SUPPORT_MODE") {
            config.mining.support_mode = Some(val);
        }
        if let Ok(val) = std::env::var("STRIDE_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("STRIDE_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
