//! Mining configuration.

use serde::{Deserialize, Serialize};

/// Configuration for forest building and pattern mining.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MiningConfig {
    /// Maximum continuation length captured after each anchor occurrence.
    /// Default: 5.
    pub continuation_limit: Option<u32>,
    /// Fraction of the support base a pattern must reach. Default: 0.05.
    pub support_threshold: Option<f64>,
    /// Support mode: "absolute" or "relative". Default: "absolute".
    pub support_mode: Option<String>,
}

impl MiningConfig {
    /// Returns the effective continuation limit, defaulting to 5.
    pub fn effective_continuation_limit(&self) -> u32 {
        self.continuation_limit.unwrap_or(5)
    }

    /// Returns the effective support threshold, defaulting to 0.05.
    pub fn effective_support_threshold(&self) -> f64 {
        self.support_threshold.unwrap_or(0.05)
    }

    /// Returns the effective support mode, defaulting to "absolute".
    pub fn effective_support_mode(&self) -> &str {
        self.support_mode.as_deref().unwrap_or("absolute")
    }
}
