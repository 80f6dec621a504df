//! Typed JSON records on top of a [`KeyValueStore`].

use super::KeyValueStore;
use crate::error::EngineError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Outcome of loading one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Record<T> {
    Present(T),
    Absent,
    /// The bytes could not be read or decoded. Carries the reason for logging.
    Unreadable(String),
}

impl<T> Record<T> {
    pub fn present(self) -> Option<T> {
        match self {
            Record::Present(value) => Some(value),
            _ => None,
        }
    }
}

/// Read and decode the record stored under `key`.
///
/// Backend failures are folded into [`Record::Unreadable`]; callers recover
/// from them the same way as from undecodable bytes.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Record<T> {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Record::Absent,
        Err(e) => return Record::Unreadable(e.to_string()),
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Record::Present(value),
        Err(e) => Record::Unreadable(e.to_string()),
    }
}

/// Encode `value` and store it under `key`.
pub fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), EngineError> {
    let bytes = serde_json::to_vec(value)?;
    store.set(key, bytes)?;
    Ok(())
}
