//! stride-storage: SQLite persistence for forests.
//!
//! - `connection`: one serialized writer + round-robin read-only connections
//! - `migrations`: versioned schema, applied on every open
//! - `queries`: per-table row structs and prepared statements
//! - `forest_store`: persist / enumerate / load / destroy facade

pub mod connection;
pub mod forest_store;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use forest_store::{ForestStore, StoredTrieMeta};
