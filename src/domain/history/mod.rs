//! Price history domain — observations, the bounded ledger, chart views.

pub mod client;
pub mod query;
pub mod resample;
pub mod smooth;
pub mod state;

use crate::shared::PriceSource;
use serde::{Deserialize, Serialize};

pub use state::PriceHistory;

/// One price observation. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PriceSource>,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            price,
            volume_24h: None,
            market_cap: None,
            source: None,
        }
    }

    pub fn with_volume(mut self, volume_24h: f64) -> Self {
        self.volume_24h = Some(volume_24h);
        self
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    pub fn with_source(mut self, source: PriceSource) -> Self {
        self.source = Some(source);
        self
    }
}
