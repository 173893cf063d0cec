//! Configuration system for Stride.
//! TOML-based, layered resolution: env > project > defaults.

pub mod mining_config;
pub mod storage_config;
pub mod stride_config;

pub use mining_config::MiningConfig;
pub use storage_config::StorageConfig;
pub use stride_config::StrideConfig;
