// Integration tests for the history system.
//
// These tests exercise full workflows spanning the HistoryStore and
// SnapshotVault together, simulating realistic usage patterns.

use std::sync::Arc;

use textcraft_history::{HistoryConfig, HistoryStore, SnapshotVault};

fn test_config(dir: &std::path::Path, capacity: usize) -> HistoryConfig {
    HistoryConfig {
        capacity,
        data_dir: dir.to_path_buf(),
    }
}

fn new_store(surface_id: &str, vault: &Arc<SnapshotVault>, config: &HistoryConfig) -> HistoryStore {
    HistoryStore::load_or_new(surface_id.to_string(), config.clone(), Some(Arc::clone(vault)))
        .unwrap()
}

// ── Full Workflow ──────────────────────────────────────────────────────

#[test]
fn test_full_workflow_record_undo_reload_undo() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 200);
    let vault = SnapshotVault::open(dir.path()).unwrap();

    // Phase 1: record 100 distinct states
    let mut store = new_store("workflow", &vault, &config);
    for i in 0..100 {
        store.record(&format!("state-{i}"));
    }
    assert!(store.can_undo());

    // Phase 2: undo halfway
    for _ in 0..50 {
        assert!(store.undo().is_some());
    }
    assert_eq!(
        store.current_snapshot().map(|s| s.text.clone()),
        Some("state-49".to_string())
    );

    // Phase 3: drop and reload from the vault
    drop(store);
    let mut store2 = new_store("workflow", &vault, &config);

    // The vault holds the full recorded sequence; the cursor restarts at
    // the tail and the redo position is not persisted.
    assert_eq!(store2.len(), 100);
    assert!(!store2.can_redo());
    assert_eq!(
        store2.current_snapshot().map(|s| s.text.clone()),
        Some("state-99".to_string())
    );

    // Phase 4: undo all the way down
    let mut undo_count = 0;
    while store2.undo().is_some() {
        undo_count += 1;
    }
    assert_eq!(undo_count, 99);
}

// ── Multi-Surface Isolation ────────────────────────────────────────────

#[test]
fn test_ten_surfaces_share_one_vault() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 50);
    let vault = SnapshotVault::open(dir.path()).unwrap();

    let mut stores: Vec<HistoryStore> = (0..10)
        .map(|i| new_store(&format!("surf-{i}"), &vault, &config))
        .collect();

    for (i, store) in stores.iter_mut().enumerate() {
        for j in 0..20 {
            store.record(&format!("s{i}e{j}"));
        }
    }

    // Each surface has its own independent history
    for store in &mut stores {
        let mut undo_count = 0;
        while store.undo().is_some() {
            undo_count += 1;
        }
        assert_eq!(undo_count, 19);
    }

    let surfaces = vault.list_surfaces().unwrap();
    assert_eq!(surfaces.len(), 10);
}

#[test]
fn test_clear_one_surface_preserves_others() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 50);
    let vault = SnapshotVault::open(dir.path()).unwrap();

    let mut store_a = new_store("surf-a", &vault, &config);
    let mut store_b = new_store("surf-b", &vault, &config);

    for i in 0..5 {
        store_a.record(&format!("a{i}"));
        store_b.record(&format!("b{i}"));
    }

    store_a.clear().unwrap();
    drop(store_a);
    drop(store_b);

    let reloaded_a = new_store("surf-a", &vault, &config);
    let reloaded_b = new_store("surf-b", &vault, &config);
    assert!(reloaded_a.is_empty());
    assert_eq!(reloaded_b.len(), 5);
}

// ── Eviction Across Reload ─────────────────────────────────────────────

#[test]
fn test_eviction_applies_before_and_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 10);
    let vault = SnapshotVault::open(dir.path()).unwrap();

    let mut store = new_store("bounded", &vault, &config);
    for i in 0..30 {
        store.record(&format!("e{i}"));
    }
    assert_eq!(store.len(), 10);
    drop(store);

    let store2 = new_store("bounded", &vault, &config);
    assert_eq!(store2.len(), 10);
    assert_eq!(
        store2.current_snapshot().map(|s| s.text.clone()),
        Some("e29".to_string())
    );
}

// ── Large Payload Handling ─────────────────────────────────────────────

#[test]
fn test_large_snapshot_100kb_payload() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 10);
    let vault = SnapshotVault::open(dir.path()).unwrap();

    let large_text = "x".repeat(100_000);
    let mut store = new_store("large", &vault, &config);
    store.record("small");
    store.record(&large_text);
    drop(store);

    let store2 = new_store("large", &vault, &config);
    assert_eq!(
        store2.current_snapshot().map(|s| s.text.len()),
        Some(100_000)
    );
}

// ── Edge Cases ─────────────────────────────────────────────────────────

#[test]
fn test_redo_branch_abandonment_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 50);
    let vault = SnapshotVault::open(dir.path()).unwrap();

    let mut store = new_store("branch", &vault, &config);
    store.record("a");
    store.record("b");
    store.record("c");

    store.undo();
    store.undo();
    store.record("z");
    drop(store);

    // Only the linear history ["a", "z"] was persisted.
    let mut store2 = new_store("branch", &vault, &config);
    assert_eq!(store2.len(), 2);
    assert_eq!(store2.undo().as_deref(), Some("a"));
    assert_eq!(store2.redo().as_deref(), Some("z"));
}

#[test]
fn test_coalescing_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path(), 50);
    let vault = SnapshotVault::open(dir.path()).unwrap();

    let mut store = new_store("coalesce", &vault, &config);
    store.record("same");
    store.record("same");
    store.record("same");
    drop(store);

    let store2 = new_store("coalesce", &vault, &config);
    assert_eq!(store2.len(), 1);
}

#[test]
fn test_in_memory_store_needs_no_vault() {
    let mut store = HistoryStore::in_memory();
    store.record("a");
    store.record("b");
    assert_eq!(store.undo().as_deref(), Some("a"));
    store.clear().unwrap();
    assert!(store.is_empty());
}
