//! Queries for the build_history table — append-only log of forest builds.

use rusqlite::{params, Connection};
use stride_core::errors::StorageError;

/// A build history record.
#[derive(Debug, Clone)]
pub struct BuildHistoryRow {
    pub id: i64,
    pub category: String,
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub journey_count: Option<i64>,
    pub trie_count: Option<i64>,
    pub duration_ms: Option<i64>,
    pub status: String,
    pub error: Option<String>,
}

/// Insert a new build record (status = 'running'). Returns the row id.
pub fn insert_build_start(
    conn: &Connection,
    category: &str,
    started_at: i64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO build_history (category, started_at, status)
         VALUES (?1, ?2, 'running')",
        params![category, started_at],
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(conn.last_insert_rowid())
}

/// Update a build record with completion data.
#[allow(clippy::too_many_arguments)]
pub fn update_build_complete(
    conn: &Connection,
    id: i64,
    completed_at: i64,
    journey_count: Option<i64>,
    trie_count: Option<i64>,
    duration_ms: Option<i64>,
    status: &str,
    error: Option<&str>,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE build_history SET
            completed_at = ?1, journey_count = ?2, trie_count = ?3,
            duration_ms = ?4, status = ?5, error = ?6
         WHERE id = ?7",
        params![completed_at, journey_count, trie_count, duration_ms, status, error, id],
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(())
}

/// Query recent build history entries, newest first.
pub fn query_recent(
    conn: &Connection,
    limit: usize,
) -> Result<Vec<BuildHistoryRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, category, started_at, completed_at, journey_count,
                    trie_count, duration_ms, status, error
             FROM build_history ORDER BY started_at DESC, id DESC LIMIT ?1",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(BuildHistoryRow {
                id: row.get(0)?,
                category: row.get(1)?,
                started_at: row.get(2)?,
                completed_at: row.get(3)?,
                journey_count: row.get(4)?,
                trie_count: row.get(5)?,
                duration_ms: row.get(6)?,
                status: row.get(7)?,
                error: row.get(8)?,
            })
        })
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Count total build history entries.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM build_history", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
