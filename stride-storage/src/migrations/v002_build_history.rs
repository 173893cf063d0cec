//! V002: build_history — append-only log of forest builds.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS build_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    started_at INTEGER NOT NULL,
    completed_at INTEGER,
    journey_count INTEGER,
    trie_count INTEGER,
    duration_ms INTEGER,
    status TEXT NOT NULL DEFAULT 'running',
    error TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_build_history_time
    ON build_history(started_at DESC);
CREATE INDEX IF NOT EXISTS idx_build_history_category
    ON build_history(category);
"#;
