//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the SQLite persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. Default: "stride.db".
    pub db_path: Option<String>,
    /// Number of read-only connections in the pool. Default: 4.
    pub read_pool_size: Option<usize>,
}

impl StorageConfig {
    /// Returns the effective database path, defaulting to "stride.db".
    pub fn effective_db_path(&self) -> &str {
        self.db_path.as_deref().unwrap_or("stride.db")
    }

    /// Returns the effective read pool size, defaulting to 4.
    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(4)
    }
}
