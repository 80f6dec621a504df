//! Price snapshot domain — the current CVT price and its derived statistics.

pub mod client;
pub mod state;

use crate::constants::{
    DEFAULT_CHANGE_24H, DEFAULT_CHANGE_7D, DEFAULT_CURRENT, DEFAULT_HIGH_24H, DEFAULT_LOW_24H,
    DEFAULT_MARKET_CAP, DEFAULT_VOLUME_24H,
};
use crate::domain::history::PricePoint;
use crate::shared::PriceSource;
use serde::{Deserialize, Serialize};

pub use state::SnapshotRead;

/// Current best-known CVT price record.
///
/// `last_updated` is the timestamp (Unix ms) of the write that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvtPrice {
    pub current: f64,
    pub change_24h: f64,
    pub change_7d: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub last_updated: i64,
}

impl CvtPrice {
    /// The compiled-in default snapshot, stamped at `now_ms`.
    pub fn default_at(now_ms: i64) -> Self {
        Self {
            current: DEFAULT_CURRENT,
            change_24h: DEFAULT_CHANGE_24H,
            change_7d: DEFAULT_CHANGE_7D,
            high_24h: DEFAULT_HIGH_24H,
            low_24h: DEFAULT_LOW_24H,
            volume_24h: DEFAULT_VOLUME_24H,
            market_cap: DEFAULT_MARKET_CAP,
            last_updated: now_ms,
        }
    }

    /// Same values, restamped.
    pub fn stamped(self, last_updated: i64) -> Self {
        Self {
            last_updated,
            ..self
        }
    }

    /// Age of this snapshot at `now_ms`, saturating at the `i64` bounds.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.last_updated)
    }

    /// The history point recording this snapshot.
    pub fn to_point(&self, source: Option<PriceSource>) -> PricePoint {
        PricePoint {
            timestamp: self.last_updated,
            price: self.current,
            volume_24h: Some(self.volume_24h),
            market_cap: Some(self.market_cap),
            source,
        }
    }
}

/// Partial update merged over the current snapshot.
///
/// Each `Some` field replaces the snapshot's value, each `None` keeps it.
/// `last_updated` is never taken from an update; the merge stamps it.
/// `source` does not touch the snapshot and only tags the history point the
/// update records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceUpdate {
    pub current: Option<f64>,
    pub change_24h: Option<f64>,
    pub change_7d: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub volume_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub source: Option<PriceSource>,
}

impl PriceUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(mut self, value: f64) -> Self {
        self.current = Some(value);
        self
    }

    pub fn change_24h(mut self, value: f64) -> Self {
        self.change_24h = Some(value);
        self
    }

    pub fn change_7d(mut self, value: f64) -> Self {
        self.change_7d = Some(value);
        self
    }

    pub fn high_24h(mut self, value: f64) -> Self {
        self.high_24h = Some(value);
        self
    }

    pub fn low_24h(mut self, value: f64) -> Self {
        self.low_24h = Some(value);
        self
    }

    pub fn volume_24h(mut self, value: f64) -> Self {
        self.volume_24h = Some(value);
        self
    }

    pub fn market_cap(mut self, value: f64) -> Self {
        self.market_cap = Some(value);
        self
    }

    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Merge over `base` and stamp the result with `now_ms`.
    pub fn apply(&self, base: &CvtPrice, now_ms: i64) -> CvtPrice {
        CvtPrice {
            current: self.current.unwrap_or(base.current),
            change_24h: self.change_24h.unwrap_or(base.change_24h),
            change_7d: self.change_7d.unwrap_or(base.change_7d),
            high_24h: self.high_24h.unwrap_or(base.high_24h),
            low_24h: self.low_24h.unwrap_or(base.low_24h),
            volume_24h: self.volume_24h.unwrap_or(base.volume_24h),
            market_cap: self.market_cap.unwrap_or(base.market_cap),
            last_updated: now_ms,
        }
    }
}
