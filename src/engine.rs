//! `PriceEngine` — the context object with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, configuration, the shared store/clock
//! handles and the write lock.

use crate::constants::{
    CONTRACT_DEPLOYMENT_MS, MAX_HISTORY_POINTS, PRICE_CHANGE_THRESHOLD, PRICE_HISTORY_KEY,
    PRICE_STORAGE_KEY, STALENESS_THRESHOLD_MS,
};
use crate::domain::history::client::History;
use crate::domain::history::{PriceHistory, PricePoint};
use crate::domain::listing::client::Aggregator;
use crate::domain::price::client::Snapshot;
use crate::domain::price::{CvtPrice, SnapshotRead};
use crate::error::EngineError;
use crate::shared::clock::{Clock, SystemClock};
use crate::store::records::{self, Record};
use crate::store::{KeyValueStore, MemoryStore};

use async_lock::{Mutex, MutexGuard};
use chrono::{FixedOffset, Offset, Utc};
use std::sync::Arc;

// Re-export sub-client types for convenience.
pub use crate::domain::history::client::History as HistoryClient;
pub use crate::domain::listing::client::Aggregator as AggregatorClient;
pub use crate::domain::price::client::Snapshot as SnapshotClient;

/// Tunables of a [`PriceEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of history points kept.
    pub history_capacity: usize,
    /// Snapshots older than this are replaced by `default_price` on read.
    pub staleness_threshold: chrono::Duration,
    /// Minimum relative price change for a listing-driven update.
    pub change_threshold: f64,
    /// Lower bound of the `all` time range.
    pub deployment_epoch_ms: i64,
    /// Fallback snapshot. Its `last_updated` is replaced with "now" whenever
    /// it is handed out or persisted.
    pub default_price: CvtPrice,
    /// Offset used when rendering dates for CSV export.
    pub display_offset: FixedOffset,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: MAX_HISTORY_POINTS,
            staleness_threshold: chrono::Duration::milliseconds(STALENESS_THRESHOLD_MS),
            change_threshold: PRICE_CHANGE_THRESHOLD,
            deployment_epoch_ms: CONTRACT_DEPLOYMENT_MS,
            default_price: CvtPrice::default_at(0),
            display_offset: Utc.fix(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.history_capacity == 0 {
            return Err(EngineError::Validation(
                "history_capacity must be > 0".to_string(),
            ));
        }
        if self.staleness_threshold <= chrono::Duration::zero() {
            return Err(EngineError::Validation(
                "staleness_threshold must be positive".to_string(),
            ));
        }
        if !(self.change_threshold.is_finite() && self.change_threshold >= 0.0) {
            return Err(EngineError::Validation(format!(
                "change_threshold must be a non-negative number, got {}",
                self.change_threshold
            )));
        }
        Ok(())
    }
}

/// The primary entry point of the engine.
///
/// Owns one current-price snapshot and one history ledger (both persisted in
/// the configured store) and provides nested sub-client accessors:
/// `engine.snapshot()`, `engine.history()`, `engine.aggregator()`.
///
/// Clones share the store, clock and write lock, so a clone handed to another
/// thread still serializes its writes with the original.
pub struct PriceEngine {
    pub(crate) store: Arc<dyn KeyValueStore>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) config: Arc<EngineConfig>,
    /// Held across every read-merge-write of the snapshot and history.
    pub(crate) write_lock: Arc<Mutex<()>>,
}

impl PriceEngine {
    pub fn builder() -> PriceEngineBuilder {
        PriceEngineBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { engine: self }
    }

    pub fn history(&self) -> History<'_> {
        History { engine: self }
    }

    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator { engine: self }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    // ── Shared plumbing for sub-clients ──────────────────────────────────

    pub(crate) fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock_blocking()
    }

    pub(crate) fn default_price(&self, now_ms: i64) -> CvtPrice {
        self.config.default_price.stamped(now_ms)
    }

    /// Load and classify the current-price record. Never mutates the store.
    pub(crate) fn read_snapshot(&self) -> SnapshotRead {
        let now = self.now_ms();
        let read = SnapshotRead::resolve(
            records::load(self.store.as_ref(), PRICE_STORAGE_KEY),
            self.default_price(now),
            now,
            self.config.staleness_threshold.num_milliseconds(),
        );

        match &read {
            SnapshotRead::Stale { stored, .. } => tracing::warn!(
                "CVT price data is stale ({} ms old), using default",
                stored.age_ms(now)
            ),
            SnapshotRead::Corrupt { reason, .. } => {
                tracing::warn!("Unreadable CVT price record, using default: {}", reason)
            }
            SnapshotRead::Fresh(_) | SnapshotRead::Absent(_) => {}
        }

        read
    }

    pub(crate) fn save_snapshot(&self, price: &CvtPrice) -> Result<(), EngineError> {
        records::save(self.store.as_ref(), PRICE_STORAGE_KEY, price)
    }

    /// Copy of the ledger as currently persisted. An unreadable record loads
    /// as an empty ledger.
    pub(crate) fn load_history(&self) -> PriceHistory {
        let capacity = self.config.history_capacity;
        match records::load::<Vec<PricePoint>>(self.store.as_ref(), PRICE_HISTORY_KEY) {
            Record::Present(points) => PriceHistory::from_points(points, capacity),
            Record::Absent => PriceHistory::new(capacity),
            Record::Unreadable(reason) => {
                tracing::warn!("Unreadable price history record, starting empty: {}", reason);
                PriceHistory::new(capacity)
            }
        }
    }

    pub(crate) fn save_history(&self, history: &PriceHistory) -> Result<(), EngineError> {
        records::save(self.store.as_ref(), PRICE_HISTORY_KEY, history.points())
    }

    pub(crate) fn remove_history(&self) -> Result<(), EngineError> {
        self.store.remove(PRICE_HISTORY_KEY)?;
        Ok(())
    }

    /// Append one point to the persisted ledger. Caller holds the write lock.
    pub(crate) fn append_history_locked(&self, point: PricePoint) -> Result<(), EngineError> {
        let mut history = self.load_history();
        history.append(point);
        self.save_history(&history)
    }
}

impl Clone for PriceEngine {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
            write_lock: self.write_lock.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct PriceEngineBuilder {
    store: Option<Arc<dyn KeyValueStore>>,
    clock: Option<Arc<dyn Clock>>,
    config: EngineConfig,
}

impl Default for PriceEngineBuilder {
    fn default() -> Self {
        Self {
            store: None,
            clock: None,
            config: EngineConfig::default(),
        }
    }
}

impl PriceEngineBuilder {
    /// Backend for the persisted records. Defaults to a fresh [`MemoryStore`].
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Time source. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    pub fn staleness_threshold(mut self, threshold: chrono::Duration) -> Self {
        self.config.staleness_threshold = threshold;
        self
    }

    pub fn change_threshold(mut self, threshold: f64) -> Self {
        self.config.change_threshold = threshold;
        self
    }

    pub fn deployment_epoch_ms(mut self, epoch_ms: i64) -> Self {
        self.config.deployment_epoch_ms = epoch_ms;
        self
    }

    pub fn default_price(mut self, price: CvtPrice) -> Self {
        self.config.default_price = price;
        self
    }

    pub fn display_offset(mut self, offset: FixedOffset) -> Self {
        self.config.display_offset = offset;
        self
    }

    pub fn build(self) -> Result<PriceEngine, EngineError> {
        self.config.validate()?;
        Ok(PriceEngine {
            store: self.store.unwrap_or_else(|| Arc::new(MemoryStore::new())),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            config: Arc::new(self.config),
            write_lock: Arc::new(Mutex::new(())),
        })
    }
}
