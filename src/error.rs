//! Unified engine error types.
//!
//! Corrupt or stale persisted state never surfaces here; those paths recover
//! to the default snapshot (see [`crate::domain::price::SnapshotRead`]).

use thiserror::Error;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised by a [`crate::store::KeyValueStore`] backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("I/O failed: {0}")]
    Io(String),
}
