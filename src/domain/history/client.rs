//! History sub-client — ledger access and chart views over the stored history.

use super::query::{self, PriceStats};
use super::{PriceHistory, PricePoint};
use crate::engine::PriceEngine;
use crate::error::EngineError;
use crate::shared::TimeRange;

/// Sub-client for the price history ledger.
///
/// Reads take one copy of the persisted ledger, so a read never observes a
/// half-applied update.
pub struct History<'a> {
    pub(crate) engine: &'a PriceEngine,
}

impl<'a> History<'a> {
    /// Append a point, evicting the oldest beyond the configured capacity.
    ///
    /// Ordering is not checked; callers append in non-decreasing timestamp
    /// order.
    pub fn append(&self, point: PricePoint) -> Result<(), EngineError> {
        let _guard = self.engine.lock_writes();
        self.engine.append_history_locked(point)
    }

    /// All stored points, or only the last `limit`, in stored order.
    pub fn all(&self, limit: Option<usize>) -> Vec<PricePoint> {
        self.engine.load_history().all(limit)
    }

    /// Owned copy of the whole ledger.
    pub fn ledger(&self) -> PriceHistory {
        self.engine.load_history()
    }

    pub fn clear(&self) -> Result<(), EngineError> {
        let _guard = self.engine.lock_writes();
        self.engine.remove_history()?;
        tracing::info!("Price history cleared");
        Ok(())
    }

    /// Points inside `range`, counted back from now, in stored order.
    pub fn for_range(&self, range: TimeRange) -> Vec<PricePoint> {
        let cutoff = range.cutoff(self.engine.now_ms(), self.engine.config.deployment_epoch_ms);
        self.since(cutoff)
    }

    /// Like [`for_range`](Self::for_range) for a raw range token
    /// (`"5s"`, `"24h"`, `"all"`, ...). Unknown tokens select everything.
    pub fn for_range_token(&self, token: &str) -> Vec<PricePoint> {
        match TimeRange::parse(token) {
            Some(range) => self.for_range(range),
            None => {
                tracing::debug!("Unknown time range {:?}, returning full history", token);
                self.since(0)
            }
        }
    }

    /// Summary statistics of the points inside `range`.
    pub fn stats(&self, range: TimeRange) -> PriceStats {
        query::calculate_price_stats(&self.for_range(range))
    }

    /// The whole ledger as CSV.
    pub fn export_csv(&self) -> String {
        let history = self.engine.load_history().into_vec();
        query::to_csv(&history, &self.engine.config.display_offset)
    }

    fn since(&self, cutoff: i64) -> Vec<PricePoint> {
        let history = self.engine.load_history().into_vec();
        query::points_since(&history, cutoff)
    }
}
