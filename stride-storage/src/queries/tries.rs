//! tries table queries.

use rusqlite::{params, Connection, OptionalExtension};
use stride_core::errors::StorageError;

/// A trie metadata row.
#[derive(Debug, Clone)]
pub struct TrieRow {
    pub id: i64,
    pub category: String,
    pub anchor: String,
    pub support_base: i64,
    pub journey_count: i64,
    pub created_at: i64,
}

/// Insert a new trie row. Returns the row id.
pub fn insert_trie(
    conn: &Connection,
    category: &str,
    anchor: &str,
    support_base: i64,
    journey_count: i64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO tries (category, anchor, support_base, journey_count)
         VALUES (?1, ?2, ?3, ?4)",
        params![category, anchor, support_base, journey_count],
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(conn.last_insert_rowid())
}

/// Get a trie row by id.
pub fn get_trie(conn: &Connection, id: i64) -> Result<Option<TrieRow>, StorageError> {
    conn.query_row(
        "SELECT id, category, anchor, support_base, journey_count, created_at
         FROM tries WHERE id = ?1",
        params![id],
        |row| {
            Ok(TrieRow {
                id: row.get(0)?,
                category: row.get(1)?,
                anchor: row.get(2)?,
                support_base: row.get(3)?,
                journey_count: row.get(4)?,
                created_at: row.get(5)?,
            })
        },
    )
    .optional()
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Get all trie rows tagged with a category, ordered by anchor.
pub fn get_by_category(
    conn: &Connection,
    category: &str,
) -> Result<Vec<TrieRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, category, anchor, support_base, journey_count, created_at
             FROM tries WHERE category = ?1 ORDER BY anchor",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![category], |row| {
            Ok(TrieRow {
                id: row.get(0)?,
                category: row.get(1)?,
                anchor: row.get(2)?,
                support_base: row.get(3)?,
                journey_count: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Delete a trie row. Returns the number of rows removed (0 or 1).
pub fn delete_trie(conn: &Connection, id: i64) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM tries WHERE id = ?1", params![id])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Count tries in a category.
pub fn count_by_category(conn: &Connection, category: &str) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM tries WHERE category = ?1",
        params![category],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
