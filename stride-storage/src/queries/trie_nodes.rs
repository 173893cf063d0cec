//! trie_nodes table queries.

use rusqlite::{params, Connection};
use stride_core::errors::StorageError;

/// A trie node row. `parent_id` is NULL only on the root row.
#[derive(Debug, Clone)]
pub struct TrieNodeRow {
    pub id: i64,
    pub trie_id: i64,
    pub parent_id: Option<i64>,
    pub edge_labels: String,
    pub own_journeys: String,
}

/// Insert a node row. Returns the row id.
pub fn insert_node(
    conn: &Connection,
    trie_id: i64,
    parent_id: Option<i64>,
    edge_labels: &str,
    own_journeys: &str,
) -> Result<i64, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO trie_nodes (trie_id, parent_id, edge_labels, own_journeys)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    stmt.execute(params![trie_id, parent_id, edge_labels, own_journeys])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(conn.last_insert_rowid())
}

/// Get all node rows of a trie, parents before children.
///
/// Nodes are written parent-first, so ascending row id preserves the
/// order a rebuild needs.
pub fn get_nodes_by_trie(
    conn: &Connection,
    trie_id: i64,
) -> Result<Vec<TrieNodeRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, trie_id, parent_id, edge_labels, own_journeys
             FROM trie_nodes WHERE trie_id = ?1 ORDER BY id",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![trie_id], |row| {
            Ok(TrieNodeRow {
                id: row.get(0)?,
                trie_id: row.get(1)?,
                parent_id: row.get(2)?,
                edge_labels: row.get(3)?,
                own_journeys: row.get(4)?,
            })
        })
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Delete all node rows of a trie. Returns the number of rows removed.
pub fn delete_nodes_by_trie(conn: &Connection, trie_id: i64) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM trie_nodes WHERE trie_id = ?1", params![trie_id])
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Count node rows of a trie.
pub fn count_by_trie(conn: &Connection, trie_id: i64) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM trie_nodes WHERE trie_id = ?1",
        params![trie_id],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
