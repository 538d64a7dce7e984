//! Persisted values over the file and memory backends.

mod common;

use blogdash::storage::{read, DurableStore, FileStore, MemoryStore, PersistentValue};
use common::{capture_logs, FailingStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Loadout {
    weapon: String,
    potions: u32,
}

fn loadout(weapon: &str, potions: u32) -> Loadout {
    Loadout {
        weapon: weapon.to_string(),
        potions,
    }
}

#[test]
fn test_written_value_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    {
        let store: Arc<dyn DurableStore> = Arc::new(FileStore::open(&path));
        let mut value = PersistentValue::open(store, "loadout", loadout("stick", 0));
        value.set(loadout("longsword", 3));
    }

    let reopened = FileStore::open(&path);
    assert_eq!(
        read(&reopened, "loadout", loadout("stick", 0)),
        loadout("longsword", 3)
    );
}

#[test]
fn test_read_after_write_never_returns_default() {
    let store: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
    let mut count = PersistentValue::open(Arc::clone(&store), "questCount", 0u64);

    for n in 1..=5u64 {
        count.set(n);
        assert_eq!(read(store.as_ref(), "questCount", 999u64), n);
    }
}

#[test]
fn test_missing_key_returns_default() {
    let store = MemoryStore::new();
    assert_eq!(read(&store, "questCount", 0u64), 0);
    assert_eq!(read(&store, "loadout", loadout("stick", 1)), loadout("stick", 1));
    assert!(store.is_empty());
}

#[test]
fn test_corrupt_file_is_replaced_on_next_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json at all").unwrap();

    let store: Arc<dyn DurableStore> = Arc::new(FileStore::open(&path));
    let mut count = PersistentValue::open(Arc::clone(&store), "questCount", 0u64);
    assert_eq!(*count.get(), 0);

    count.set(100);
    let reopened = FileStore::open(&path);
    assert_eq!(read(&reopened, "questCount", 0u64), 100);
}

#[test]
fn test_unavailable_backend_keeps_in_memory_value() {
    let store: Arc<dyn DurableStore> = Arc::new(FailingStore);
    let mut count = PersistentValue::open(store, "questCount", 7u64);
    assert_eq!(*count.get(), 7);

    count.update(|n| n + 1);
    assert_eq!(*count.get(), 8);
}

#[test]
fn test_unavailable_backend_reports_write_failure() {
    let store: Arc<dyn DurableStore> = Arc::new(FailingStore);
    let mut count = PersistentValue::open(store, "questCount", 7u64);

    let (_, events) = capture_logs(|| count.set(9));
    assert_eq!(*count.get(), 9);
    assert!(events.iter().any(|(level, message)| {
        *level == tracing::Level::ERROR
            && message.contains("Error persisting value")
            && message.contains("storage disabled")
    }));
}

#[test]
fn test_store_file_holds_json_text_per_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let store: Arc<dyn DurableStore> = Arc::new(FileStore::open(&path));
    let mut count = PersistentValue::open(store, "questCount", 0u64);
    count.set(42);

    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["questCount"], "42");
}
