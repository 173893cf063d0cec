//! Storage errors.

use super::error_code::{self, StrideErrorCode};

/// Errors that can occur in the SQLite persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration v{version} failed: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Corrupt data: {message}")]
    Corrupt { message: String },

    #[error("Trie {id} not found")]
    TrieNotFound { id: i64 },
}

impl StrideErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::Corrupt { .. } => error_code::DB_CORRUPT,
            Self::TrieNotFound { .. } => error_code::TRIE_NOT_FOUND,
        }
    }
}
