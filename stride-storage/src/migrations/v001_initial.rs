//! V001: Initial schema — tries and trie_nodes.

pub const MIGRATION_SQL: &str = r#"
-- One row per persisted trie, keyed by forest category and anchor label.
CREATE TABLE IF NOT EXISTS tries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    anchor TEXT NOT NULL,
    support_base INTEGER NOT NULL,
    journey_count INTEGER NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
) STRICT;

CREATE INDEX IF NOT EXISTS idx_tries_category ON tries(category);
CREATE INDEX IF NOT EXISTS idx_tries_anchor ON tries(category, anchor);

-- Trie nodes: parent_id is NULL only for the root row.
-- edge_labels is a JSON array of action labels, own_journeys a JSON
-- array of journey ids.
CREATE TABLE IF NOT EXISTS trie_nodes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    trie_id INTEGER NOT NULL,
    parent_id INTEGER,
    edge_labels TEXT NOT NULL,
    own_journeys TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_trie_nodes_trie ON trie_nodes(trie_id);
CREATE INDEX IF NOT EXISTS idx_trie_nodes_parent ON trie_nodes(parent_id)
    WHERE parent_id IS NOT NULL;
"#;
