//! Durable key-value storage and the typed values mirrored into it.
//!
//! A [`DurableStore`] is a synchronous string-keyed map of serialized
//! JSON text. [`PersistentValue`] keeps an in-memory copy of one key and
//! writes every update through to the store.

mod error;
mod file;
mod memory;
mod persisted;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use persisted::{read, PersistentValue};

/// Durable store boundary.
///
/// Implementations must be safe to share across the application; the
/// crate assumes a single writer per key within one process.
pub trait DurableStore: Send + Sync {
    /// Raw serialized value for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Persist `raw` under `key`, replacing any previous value.
    fn set(&self, key: &str, raw: &str) -> Result<(), StoreError>;
}
