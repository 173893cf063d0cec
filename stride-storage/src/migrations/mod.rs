//! Versioned schema migrations, applied in order on every open.

pub mod v001_initial;
pub mod v002_build_history;

use rusqlite::Connection;
use stride_core::errors::StorageError;
use tracing::info;

/// All migrations in apply order.
const MIGRATIONS: &[(u32, &str)] = &[
    (1, v001_initial::MIGRATION_SQL),
    (2, v002_build_history::MIGRATION_SQL),
];

/// Apply every migration not yet recorded in `schema_migrations`.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL DEFAULT (unixepoch())
        ) STRICT;",
    )
    .map_err(|e| StorageError::SqliteError {
        message: format!("failed to create schema_migrations: {e}"),
    })?;

    for &(version, sql) in MIGRATIONS {
        let applied: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE version = ?1)",
                [version],
                |row| row.get(0),
            )
            .map_err(|e| StorageError::SqliteError {
                message: e.to_string(),
            })?;
        if applied {
            continue;
        }

        conn.execute_batch(sql)
            .map_err(|e| StorageError::MigrationFailed {
                version,
                message: e.to_string(),
            })?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (?1)", [version])
            .map_err(|e| StorageError::MigrationFailed {
                version,
                message: e.to_string(),
            })?;
        info!(version, "applied migration");
    }
    Ok(())
}

/// Highest applied schema version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}
