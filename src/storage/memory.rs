use std::collections::HashMap;

use parking_lot::RwLock;

use super::{DurableStore, StoreError};

/// Process-local store. Contents vanish with the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with raw entries, e.g. to simulate what an
    /// earlier run left behind.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_string(), raw.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("questCount", "100").unwrap();
        assert_eq!(store.get("questCount").unwrap().as_deref(), Some("100"));
        assert_eq!(store.get("missing").unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let store = MemoryStore::with_entries([("k", "1")]);
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
    }
}
