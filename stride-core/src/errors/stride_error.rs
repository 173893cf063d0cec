//! Top-level error aggregating subsystem errors via `From` conversions.

use super::error_code::StrideErrorCode;
use super::{BuildError, ConfigError, StorageError};

/// Errors surfaced by the public Stride API.
#[derive(Debug, thiserror::Error)]
pub enum StrideError {
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StrideErrorCode for StrideError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Build(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
