use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DurableStore, StoreError};

/// Read `key` from `store`, falling back to `default`.
///
/// Missing keys, backend failures and values that do not decode into `T`
/// all yield `default`; the store is never modified.
pub fn read<T: DeserializeOwned>(store: &dyn DurableStore, key: &str, default: T) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(err) => {
            tracing::error!(key, "Error reading stored key: {}", err);
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(key, "Stored value does not decode, using default: {}", err);
            default
        }
    }
}

fn write<T: Serialize>(store: &dyn DurableStore, key: &str, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::SerializeError {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// A typed value mirrored into a [`DurableStore`] key.
///
/// The mirror is initialised from the store on open and every update is
/// written through. A failed write is logged and the mirror keeps the new
/// value anyway; callers never see persistence errors.
pub struct PersistentValue<T> {
    key: String,
    store: Arc<dyn DurableStore>,
    value: T,
}

impl<T> PersistentValue<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn open(store: Arc<dyn DurableStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = read(store.as_ref(), &key, default);
        Self { key, store, value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.write_through();
    }

    /// Derive the new value from the current one.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        self.value = f(&self.value);
        self.write_through();
    }

    fn write_through(&self) {
        if let Err(err) = write(self.store.as_ref(), &self.key, &self.value) {
            tracing::error!(key = %self.key, "Error persisting value: {}", err);
        }
    }
}
