//! stride-core: shared foundation for the Stride mining engine.
//!
//! - Types: interned action identifiers, journey/event/trie ids,
//!   performance collections, forest category tags
//! - Errors: one enum per subsystem, `thiserror` only
//! - Config: TOML-based layered configuration
//! - Telemetry: tracing subscriber setup

pub mod config;
pub mod errors;
pub mod telemetry;
pub mod types;

pub use config::{MiningConfig, StorageConfig, StrideConfig};
pub use errors::{BuildError, ConfigError, StorageError, StrideError};
pub use types::{
    ActionId, ActionInterner, EventId, ForestCategory, JourneyId, TrieId,
};
