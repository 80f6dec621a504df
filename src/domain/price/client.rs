//! Snapshot sub-client — read, update and reset the current price.

use super::{CvtPrice, PriceUpdate, SnapshotRead};
use crate::engine::PriceEngine;
use crate::error::EngineError;

/// Sub-client for the current-price snapshot.
pub struct Snapshot<'a> {
    pub(crate) engine: &'a PriceEngine,
}

impl<'a> Snapshot<'a> {
    /// The price to use right now.
    ///
    /// The persisted snapshot if it is fresh, otherwise the default. Falling
    /// back never writes: a stale record stays in the store, and every read
    /// keeps returning the default until a real update lands.
    pub fn current(&self) -> CvtPrice {
        self.engine.read_snapshot().into_price()
    }

    /// Like [`current`](Self::current), but reports which recovery path was
    /// taken.
    pub fn read(&self) -> SnapshotRead {
        self.engine.read_snapshot()
    }

    /// Merge `update` over the current price, stamp it, persist it and record
    /// it in the history. Returns the stored snapshot.
    pub fn set(&self, update: PriceUpdate) -> Result<CvtPrice, EngineError> {
        let _guard = self.engine.lock_writes();
        self.set_locked(&update)
    }

    /// Body of [`set`](Self::set); the caller holds the write lock.
    pub(crate) fn set_locked(&self, update: &PriceUpdate) -> Result<CvtPrice, EngineError> {
        let base = self.current();
        let price = update.apply(&base, self.engine.now_ms());

        self.engine.save_snapshot(&price)?;
        self.engine
            .append_history_locked(price.to_point(update.source))?;

        tracing::info!(
            "CVT price set to {:.4} (was {:.4})",
            price.current,
            base.current
        );
        Ok(price)
    }

    /// Persist the default snapshot, stamped now. History is untouched.
    pub fn reset_to_default(&self) -> Result<CvtPrice, EngineError> {
        let _guard = self.engine.lock_writes();
        self.reset_locked()
    }

    /// Persist the default snapshot and clear the history.
    pub fn reset_all(&self) -> Result<CvtPrice, EngineError> {
        let _guard = self.engine.lock_writes();
        let price = self.reset_locked()?;
        self.engine.remove_history()?;
        tracing::info!("Price history cleared");
        Ok(price)
    }

    fn reset_locked(&self) -> Result<CvtPrice, EngineError> {
        let price = self.engine.default_price(self.engine.now_ms());
        self.engine.save_snapshot(&price)?;
        tracing::info!("CVT price reset to default");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use crate::constants::{PRICE_HISTORY_KEY, PRICE_STORAGE_KEY};
    use crate::domain::price::{CvtPrice, PriceUpdate, SnapshotRead};
    use crate::engine::PriceEngine;
    use crate::shared::clock::ManualClock;
    use crate::shared::PriceSource;
    use crate::store::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    const T0: i64 = 1_800_000_000_000;

    fn engine() -> (PriceEngine, Arc<MemoryStore>, Arc<ManualClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(T0));
        let engine = PriceEngine::builder()
            .store(store.clone())
            .clock(clock.clone())
            .build()
            .unwrap();
        (engine, store, clock)
    }

    #[test]
    fn test_absent_snapshot_returns_default_without_persisting() {
        let (engine, store, _) = engine();
        let price = engine.snapshot().current();
        assert_eq!(price, CvtPrice::default_at(T0));
        assert!(matches!(engine.snapshot().read(), SnapshotRead::Absent(_)));
        assert!(store.get(PRICE_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_set_merges_persists_and_appends() {
        let (engine, _, clock) = engine();
        clock.advance(1_000);

        let price = engine
            .snapshot()
            .set(PriceUpdate::new().current(1.2).market_cap(2_000_000.0))
            .unwrap();
        assert_eq!(price.current, 1.2);
        assert_eq!(price.market_cap, 2_000_000.0);
        assert_eq!(price.change_7d, 8.3);
        assert_eq!(price.last_updated, T0 + 1_000);

        assert_eq!(engine.snapshot().read(), SnapshotRead::Fresh(price));

        let history = engine.history().all(None);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].timestamp, price.last_updated);
        assert_eq!(history[0].price, 1.2);
        assert_eq!(history[0].volume_24h, Some(45_678.50));
        assert_eq!(history[0].market_cap, Some(2_000_000.0));
        assert_eq!(history[0].source, None);
    }

    #[test]
    fn test_set_tags_history_point_with_source() {
        let (engine, _, _) = engine();
        engine
            .snapshot()
            .set(PriceUpdate::new().current(0.9).source(PriceSource::Manual))
            .unwrap();
        let latest = engine.history().all(Some(1));
        assert_eq!(latest[0].source, Some(PriceSource::Manual));
    }

    #[test]
    fn test_stale_snapshot_is_not_repersisted() {
        let (engine, store, clock) = engine();
        engine.snapshot().set(PriceUpdate::new().current(1.42)).unwrap();
        let stored_bytes = store.get(PRICE_STORAGE_KEY).unwrap();

        clock.advance(7_200_000);
        for _ in 0..3 {
            let read = engine.snapshot().read();
            assert!(matches!(read, SnapshotRead::Stale { ref stored, .. } if stored.current == 1.42));
            assert_eq!(read.price().current, 1.0);
        }
        assert_eq!(store.get(PRICE_STORAGE_KEY).unwrap(), stored_bytes);
    }

    #[test]
    fn test_set_over_stale_snapshot_merges_onto_default() {
        let (engine, _, clock) = engine();
        engine
            .snapshot()
            .set(PriceUpdate::new().current(1.42).change_24h(-3.0))
            .unwrap();
        clock.advance(7_200_000);

        let price = engine.snapshot().set(PriceUpdate::new().current(1.3)).unwrap();
        assert_eq!(price.current, 1.3);
        assert_eq!(price.change_24h, 2.5);
        assert!(engine.snapshot().read().is_fresh());
    }

    #[test]
    fn test_corrupt_snapshot_recovers_to_default() {
        let (engine, store, _) = engine();
        store.set(PRICE_STORAGE_KEY, b"not-json".to_vec()).unwrap();
        assert!(matches!(engine.snapshot().read(), SnapshotRead::Corrupt { .. }));
        assert_eq!(engine.snapshot().current().current, 1.0);

        let price = engine.snapshot().set(PriceUpdate::new().current(1.1)).unwrap();
        assert_eq!(price.change_24h, 2.5);
    }

    #[test]
    fn test_reset_to_default_keeps_history() {
        let (engine, store, _) = engine();
        engine.snapshot().set(PriceUpdate::new().current(2.0)).unwrap();

        let price = engine.snapshot().reset_to_default().unwrap();
        assert_eq!(price, CvtPrice::default_at(T0));
        assert_eq!(engine.snapshot().read(), SnapshotRead::Fresh(price));
        assert_eq!(engine.history().all(None).len(), 1);
        assert!(store.get(PRICE_HISTORY_KEY).unwrap().is_some());
    }

    #[test]
    fn test_reset_all_clears_history() {
        let (engine, store, _) = engine();
        engine.snapshot().set(PriceUpdate::new().current(2.0)).unwrap();

        engine.snapshot().reset_all().unwrap();
        assert_eq!(engine.snapshot().current().current, 1.0);
        assert!(engine.history().all(None).is_empty());
        assert!(store.get(PRICE_HISTORY_KEY).unwrap().is_none());
    }

    #[test]
    fn test_extreme_stored_timestamp_falls_back_to_default() {
        let (engine, store, _) = engine();
        let record = format!(
            r#"{{"current":9.0,"change24h":0.0,"change7d":0.0,"high24h":9.0,"low24h":9.0,"volume24h":0.0,"marketCap":0.0,"lastUpdated":{}}}"#,
            i64::MIN
        );
        store.set(PRICE_STORAGE_KEY, record.into_bytes()).unwrap();

        assert!(matches!(engine.snapshot().read(), SnapshotRead::Stale { .. }));
        assert_eq!(engine.snapshot().current(), CvtPrice::default_at(T0));
    }
}
