//! ForestStore — persist, enumerate, load, and destroy forests.

use std::sync::Arc;

use rusqlite::Connection;
use tracing::info;

use stride_core::errors::StorageError;
use stride_core::types::collections::{FxHashMap, FxHashSet, SmallVec4};
use stride_core::types::{ActionId, ActionInterner, ForestCategory, JourneyId, TrieId};
use stride_mining::trie::{NodeId, Trie};
use stride_mining::Forest;

use crate::connection::DatabaseManager;
use crate::queries::{build_history, trie_nodes, tries};

/// Metadata of a persisted trie, as returned by `enumerate`.
#[derive(Debug, Clone)]
pub struct StoredTrieMeta {
    pub id: TrieId,
    pub category: ForestCategory,
    pub anchor: String,
    pub support_base: u64,
    pub journey_count: u64,
    pub created_at: i64,
}

impl StoredTrieMeta {
    fn from_row(row: tries::TrieRow) -> Self {
        Self {
            id: TrieId::new(row.id),
            category: ForestCategory::from(row.category.as_str()),
            anchor: row.anchor,
            support_base: row.support_base as u64,
            journey_count: row.journey_count as u64,
            created_at: row.created_at,
        }
    }
}

/// Facade over the persisted forest schema.
pub struct ForestStore {
    db: Arc<DatabaseManager>,
}

impl ForestStore {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Persist every trie of a forest in one transaction.
    ///
    /// All-or-nothing: a failure mid-persist rolls back the whole forest,
    /// so a later `enumerate` never sees a partial build.
    pub fn persist_forest(&self, forest: &Forest) -> Result<Vec<TrieId>, StorageError> {
        let interner = forest.interner();
        let ids = self.db.immediate_transaction(|tx| {
            let mut ids = Vec::with_capacity(forest.len());
            for trie in forest.tries() {
                let id = persist_trie(tx, trie, interner)?;
                ids.push(TrieId::new(id));
            }
            Ok(ids)
        })?;
        info!(category = %forest.category(), tries = ids.len(), "forest persisted");
        Ok(ids)
    }

    /// List every persisted trie tagged with a category.
    pub fn enumerate(
        &self,
        category: &ForestCategory,
    ) -> Result<Vec<StoredTrieMeta>, StorageError> {
        self.db.with_reader(|conn| {
            let rows = tries::get_by_category(conn, category.as_str())?;
            Ok(rows.into_iter().map(StoredTrieMeta::from_row).collect())
        })
    }

    /// Rebuild a persisted trie and the interner resolving its labels.
    pub fn load_trie(&self, id: TrieId) -> Result<(Trie, Arc<ActionInterner>), StorageError> {
        self.db.with_reader(|conn| {
            let meta = tries::get_trie(conn, id.raw())?
                .ok_or(StorageError::TrieNotFound { id: id.raw() })?;
            let rows = trie_nodes::get_nodes_by_trie(conn, id.raw())?;

            let interner = Arc::new(ActionInterner::new());
            let mut trie = Trie::new(
                interner.get_or_intern(&meta.anchor),
                ForestCategory::from(meta.category.as_str()),
                meta.support_base as u64,
                meta.journey_count as u64,
            );

            let mut node_ids: FxHashMap<i64, NodeId> = FxHashMap::default();
            for row in rows {
                let edge = decode_edge(&row, &interner)?;
                let journeys = decode_journeys(&row)?;
                match row.parent_id {
                    None => {
                        node_ids.insert(row.id, NodeId::ROOT);
                    }
                    Some(parent_row) => {
                        let parent = node_ids.get(&parent_row).copied().ok_or_else(|| {
                            StorageError::Corrupt {
                                message: format!(
                                    "trie node {} references missing parent {parent_row}",
                                    row.id
                                ),
                            }
                        })?;
                        let node = trie.attach_child(parent, edge, journeys);
                        node_ids.insert(row.id, node);
                    }
                }
            }
            Ok((trie, Arc::clone(&interner)))
        })
    }

    /// Delete one persisted trie: nodes first, then the trie row, in one
    /// transaction. Deleting an already-missing trie is a no-op.
    pub fn destroy_trie(&self, id: TrieId) -> Result<(), StorageError> {
        self.db.immediate_transaction(|tx| {
            trie_nodes::delete_nodes_by_trie(tx, id.raw())?;
            tries::delete_trie(tx, id.raw())?;
            Ok(())
        })
    }

    /// Delete every trie of a category. Returns the number destroyed.
    ///
    /// One transaction per trie, so an interrupted destroy leaves each
    /// trie either fully present or fully gone and a repeated call
    /// completes the remainder.
    pub fn destroy(&self, category: &ForestCategory) -> Result<usize, StorageError> {
        let metas = self.enumerate(category)?;
        for meta in &metas {
            self.destroy_trie(meta.id)?;
        }
        if !metas.is_empty() {
            info!(category = %category, tries = metas.len(), "forest destroyed");
        }
        Ok(metas.len())
    }

    /// Record the start of a forest build. Returns the history row id.
    pub fn record_build_started(&self, category: &ForestCategory) -> Result<i64, StorageError> {
        let started_at = unix_now();
        self.db
            .with_writer(|conn| build_history::insert_build_start(conn, category.as_str(), started_at))
    }

    /// Mark a build as completed.
    pub fn record_build_completed(
        &self,
        id: i64,
        journey_count: u64,
        trie_count: usize,
        duration_ms: u64,
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            build_history::update_build_complete(
                conn,
                id,
                unix_now(),
                Some(journey_count as i64),
                Some(trie_count as i64),
                Some(duration_ms as i64),
                "completed",
                None,
            )
        })
    }

    /// Mark a build as failed.
    pub fn record_build_failed(&self, id: i64, error: &str) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            build_history::update_build_complete(
                conn,
                id,
                unix_now(),
                None,
                None,
                None,
                "failed",
                Some(error),
            )
        })
    }

    /// Recent build history entries, newest first.
    pub fn recent_builds(
        &self,
        limit: usize,
    ) -> Result<Vec<build_history::BuildHistoryRow>, StorageError> {
        self.db.with_reader(|conn| build_history::query_recent(conn, limit))
    }
}

/// Write one trie: the metadata row, then nodes in preorder so every
/// parent row exists before its children.
fn persist_trie(
    conn: &Connection,
    trie: &Trie,
    interner: &ActionInterner,
) -> Result<i64, StorageError> {
    let trie_id = tries::insert_trie(
        conn,
        trie.category().as_str(),
        interner.resolve(trie.anchor()),
        trie.support_base() as i64,
        trie.journey_count() as i64,
    )?;

    let mut row_ids: FxHashMap<NodeId, i64> = FxHashMap::default();
    let root_row = trie_nodes::insert_node(
        conn,
        trie_id,
        None,
        "[]",
        &journeys_json(trie.root().own_journeys()),
    )?;
    row_ids.insert(NodeId::ROOT, root_row);

    let mut stack: Vec<NodeId> = trie.root().children().to_vec();
    while let Some(id) = stack.pop() {
        let node = trie.node(id);
        let parent_row = node.parent().and_then(|p| row_ids.get(&p).copied());
        let row = trie_nodes::insert_node(
            conn,
            trie_id,
            parent_row,
            &labels_json(node.edge(), interner),
            &journeys_json(node.own_journeys()),
        )?;
        row_ids.insert(id, row);
        stack.extend_from_slice(node.children());
    }
    Ok(trie_id)
}

fn labels_json(edge: &[ActionId], interner: &ActionInterner) -> String {
    let labels: Vec<&str> = edge.iter().map(|&a| interner.resolve(a)).collect();
    serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string())
}

fn journeys_json(journeys: &FxHashSet<JourneyId>) -> String {
    let mut ids: Vec<i64> = journeys.iter().map(|j| j.raw()).collect();
    ids.sort_unstable();
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}

fn decode_edge(
    row: &trie_nodes::TrieNodeRow,
    interner: &ActionInterner,
) -> Result<SmallVec4<ActionId>, StorageError> {
    let labels: Vec<String> =
        serde_json::from_str(&row.edge_labels).map_err(|e| StorageError::Corrupt {
            message: format!("bad edge_labels on trie node {}: {e}", row.id),
        })?;
    if row.parent_id.is_some() && labels.is_empty() {
        return Err(StorageError::Corrupt {
            message: format!("empty edge on non-root trie node {}", row.id),
        });
    }
    Ok(labels.iter().map(|l| interner.get_or_intern(l)).collect())
}

fn decode_journeys(row: &trie_nodes::TrieNodeRow) -> Result<Vec<JourneyId>, StorageError> {
    let ids: Vec<i64> =
        serde_json::from_str(&row.own_journeys).map_err(|e| StorageError::Corrupt {
            message: format!("bad own_journeys on trie node {}: {e}", row.id),
        })?;
    Ok(ids.into_iter().map(JourneyId::new).collect())
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
