//! Key/value byte store for the engine's persisted records.
//!
//! The engine owns two logical records ([`PRICE_STORAGE_KEY`] and
//! [`PRICE_HISTORY_KEY`]), both JSON-encoded. Backends only move bytes.
//!
//! [`PRICE_STORAGE_KEY`]: crate::constants::PRICE_STORAGE_KEY
//! [`PRICE_HISTORY_KEY`]: crate::constants::PRICE_HISTORY_KEY

pub mod records;

use crate::error::StoreError;
use async_lock::RwLock;
use std::collections::HashMap;

/// Generic byte-string store.
///
/// `get` and `set` must each be atomic with respect to one another: a reader
/// sees either the previous or the new value of a key, never a mix.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, the default backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read_blocking().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read_blocking().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read_blocking().get(key).cloned())
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.write_blocking().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write_blocking().remove(key);
        Ok(())
    }
}
