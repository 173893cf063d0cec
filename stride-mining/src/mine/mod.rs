//! Frequent-pattern extraction from completed tries.

pub mod miner;
pub mod pattern;

pub use miner::{PatternMiner, SupportMode};
pub use pattern::{Pattern, PatternRecord};
