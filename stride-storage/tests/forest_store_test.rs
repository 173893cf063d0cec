//! ForestStore integration: persist, enumerate, load, mine, destroy.

use std::sync::Arc;

use stride_core::errors::StorageError;
use stride_core::types::ForestCategory;
use stride_mining::{Forest, ForestBuilder, PatternMiner, SupportMode, VecJourneySource};
use stride_storage::{DatabaseManager, ForestStore};

fn fixture_forest() -> Forest {
    let mut source = VecJourneySource::new();
    source.push_journey(1, &["a", "e", "f", "g", "c"]);
    source.push_journey(2, &["a", "d", "b", "f", "g"]);
    source.push_journey(3, &["d", "e", "f", "g", "c"]);
    source.push_journey(4, &["b", "d", "a"]);
    ForestBuilder::new(ForestCategory::Continuations, 3)
        .build(&mut source)
        .unwrap()
}

fn store_in_memory() -> ForestStore {
    ForestStore::new(Arc::new(DatabaseManager::open_in_memory().unwrap()))
}

#[test]
fn test_persist_enumerate_load_mine_round_trip() {
    let store = store_in_memory();
    let forest = fixture_forest();

    let ids = store.persist_forest(&forest).unwrap();
    assert_eq!(ids.len(), forest.len());

    let metas = store.enumerate(&ForestCategory::Continuations).unwrap();
    assert_eq!(metas.len(), forest.len());
    // Anchors come back sorted.
    let anchors: Vec<&str> = metas.iter().map(|m| m.anchor.as_str()).collect();
    assert_eq!(anchors, ["a", "b", "c", "d", "e", "f", "g"]);
    for meta in &metas {
        assert_eq!(meta.category, ForestCategory::Continuations);
        assert_eq!(meta.support_base, 4);
    }

    let e_meta = metas.iter().find(|m| m.anchor == "e").unwrap();
    assert_eq!(e_meta.journey_count, 2);

    let (trie, interner) = store.load_trie(e_meta.id).unwrap();
    assert_eq!(trie.support_base(), 4);
    assert_eq!(trie.journey_count(), 2);

    // The loaded trie mines identically to the in-memory one.
    let patterns = PatternMiner::mine(&trie, 0.5, SupportMode::Absolute);
    assert_eq!(patterns.len(), 1);
    let labels: Vec<&str> = patterns[0]
        .actions()
        .iter()
        .map(|&a| interner.resolve(a))
        .collect();
    assert_eq!(labels, ["e", "f", "g", "c"]);
    assert_eq!(patterns[0].support(), 2);
}

#[test]
fn test_load_preserves_journey_sets() {
    let store = store_in_memory();
    let forest = fixture_forest();
    store.persist_forest(&forest).unwrap();

    for meta in store.enumerate(&ForestCategory::Continuations).unwrap() {
        let (loaded, _) = store.load_trie(meta.id).unwrap();
        let original = forest.get(&meta.anchor).unwrap();
        assert_eq!(loaded.journeys(), original.journeys(), "anchor {}", meta.anchor);
        assert_eq!(loaded.len(), original.len());
    }
}

#[test]
fn test_enumerate_unknown_category_is_empty() {
    let store = store_in_memory();
    store.persist_forest(&fixture_forest()).unwrap();

    let other = ForestCategory::Custom("ab_test".to_string());
    assert!(store.enumerate(&other).unwrap().is_empty());
}

#[test]
fn test_categories_are_isolated() {
    let store = store_in_memory();
    store.persist_forest(&fixture_forest()).unwrap();

    let mut source = VecJourneySource::new();
    source.push_journey(10, &["p", "q"]);
    let custom = ForestCategory::Custom("ab_test".to_string());
    let other = ForestBuilder::new(custom.clone(), 3)
        .build(&mut source)
        .unwrap();
    store.persist_forest(&other).unwrap();

    assert_eq!(store.enumerate(&custom).unwrap().len(), 2);
    assert_eq!(
        store.enumerate(&ForestCategory::Continuations).unwrap().len(),
        7
    );

    // Destroying one category leaves the other untouched.
    store.destroy(&custom).unwrap();
    assert!(store.enumerate(&custom).unwrap().is_empty());
    assert_eq!(
        store.enumerate(&ForestCategory::Continuations).unwrap().len(),
        7
    );
}

#[test]
fn test_load_missing_trie_is_not_found() {
    let store = store_in_memory();
    let err = store.load_trie(999.into()).unwrap_err();
    assert!(matches!(err, StorageError::TrieNotFound { id: 999 }));
}

#[test]
fn test_destroy_is_idempotent_and_resumable() {
    let store = store_in_memory();
    store.persist_forest(&fixture_forest()).unwrap();

    let metas = store.enumerate(&ForestCategory::Continuations).unwrap();
    assert_eq!(metas.len(), 7);

    // A partial destroy (as after a crash mid-way) leaves the remaining
    // tries fully present.
    store.destroy_trie(metas[0].id).unwrap();
    store.destroy_trie(metas[1].id).unwrap();
    let remaining = store.enumerate(&ForestCategory::Continuations).unwrap();
    assert_eq!(remaining.len(), 5);
    for meta in &remaining {
        assert!(store.load_trie(meta.id).is_ok());
    }

    // Re-running the destroy completes the remainder.
    assert_eq!(store.destroy(&ForestCategory::Continuations).unwrap(), 5);
    assert!(store
        .enumerate(&ForestCategory::Continuations)
        .unwrap()
        .is_empty());

    // Destroying an already-missing category is a no-op.
    assert_eq!(store.destroy(&ForestCategory::Continuations).unwrap(), 0);
    store.destroy_trie(metas[0].id).unwrap();
}

#[test]
fn test_build_history_log() {
    let store = store_in_memory();

    let first = store
        .record_build_started(&ForestCategory::Continuations)
        .unwrap();
    store.record_build_completed(first, 4, 7, 12).unwrap();

    let second = store
        .record_build_started(&ForestCategory::Continuations)
        .unwrap();
    store.record_build_failed(second, "journey source gone").unwrap();

    let builds = store.recent_builds(10).unwrap();
    assert_eq!(builds.len(), 2);
    // Newest first.
    assert_eq!(builds[0].id, second);
    assert_eq!(builds[0].status, "failed");
    assert_eq!(builds[0].error.as_deref(), Some("journey source gone"));
    assert_eq!(builds[1].status, "completed");
    assert_eq!(builds[1].journey_count, Some(4));
    assert_eq!(builds[1].trie_count, Some(7));
}

#[test]
fn test_file_backed_round_trip_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("stride.db");

    {
        let db = Arc::new(DatabaseManager::open(&path).unwrap());
        assert!(db.verify_wal_mode().unwrap());

        let store = ForestStore::new(db);
        store.persist_forest(&fixture_forest()).unwrap();
    }

    // A fresh manager over the same file sees the persisted forest.
    let store = ForestStore::new(Arc::new(
        DatabaseManager::open_with_readers(&path, 2).unwrap(),
    ));
    let metas = store.enumerate(&ForestCategory::Continuations).unwrap();
    assert_eq!(metas.len(), 7);

    let e_meta = metas.iter().find(|m| m.anchor == "e").unwrap();
    let (trie, _) = store.load_trie(e_meta.id).unwrap();
    let patterns = PatternMiner::mine(&trie, 0.5, SupportMode::Absolute);
    assert_eq!(patterns.len(), 1);
}

#[test]
fn test_schema_versions_applied() {
    let db = DatabaseManager::open_in_memory().unwrap();
    db.with_writer(|conn| {
        assert_eq!(stride_storage::migrations::current_version(conn).unwrap(), 2);
        for table in ["tries", "trie_nodes", "build_history"] {
            let exists: bool = conn
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert!(exists, "missing table {table}");
        }
        Ok(())
    })
    .unwrap();
}
