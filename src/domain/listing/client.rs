//! Aggregator sub-client — derive the market price from marketplace listings.

use super::{Listing, ListingSummary, UpdateOutcome};
use crate::domain::history::{PriceHistory, PricePoint};
use crate::domain::price::PriceUpdate;
use crate::engine::PriceEngine;
use crate::error::EngineError;
use crate::shared::fmt::{decimal::round_decimal, decimal_to_f64};
use crate::shared::PriceSource;
use rust_decimal::Decimal;

/// Sub-client feeding listing data into the snapshot and history.
pub struct Aggregator<'a> {
    pub(crate) engine: &'a PriceEngine,
}

impl<'a> Aggregator<'a> {
    /// Reprice from the live listings.
    ///
    /// The snapshot moves only when the weighted price, rounded to 4 decimals
    /// as it would be stored, differs from the current one by more than the
    /// configured relative threshold. An update records exactly one `listing`
    /// history point. Listing totals that overflow `Decimal` are rejected
    /// with [`EngineError::Validation`].
    pub fn update_from_listings(&self, listings: &[Listing]) -> Result<UpdateOutcome, EngineError> {
        let Some(summary) = ListingSummary::try_from_listings(listings)? else {
            tracing::debug!("No active listings, CVT price unchanged");
            return Ok(UpdateOutcome::NoActiveListings);
        };

        let _guard = self.engine.lock_writes();
        let snapshot = self.engine.snapshot();

        let candidate = rounded(summary.weighted_price, 4)?;
        let current = snapshot.current().current;
        if !exceeds_threshold(candidate, current, self.engine.config.change_threshold) {
            tracing::debug!(
                "Weighted price {:.6} within threshold of {:.6}, skipping update",
                candidate,
                current
            );
            return Ok(UpdateOutcome::BelowThreshold { candidate, current });
        }

        let update = PriceUpdate::new()
            .current(candidate)
            .high_24h(rounded(summary.high, 4)?)
            .low_24h(rounded(summary.low, 4)?)
            .volume_24h(rounded(summary.volume, 2)?)
            .source(PriceSource::Listing);
        let price = snapshot.set_locked(&update)?;

        tracing::info!(
            "CVT price updated from {} listings: {:.4}",
            summary.count,
            price.current
        );
        Ok(UpdateOutcome::Updated(price))
    }

    /// Replace the whole history with one `listing` point priced from the
    /// live listings, stamped now. With no live listings the history is
    /// emptied and `None` returned. The snapshot is not touched.
    pub fn seed_history(&self, listings: &[Listing]) -> Result<Option<PricePoint>, EngineError> {
        let summary = ListingSummary::try_from_listings(listings)?;

        let _guard = self.engine.lock_writes();
        let mut history = PriceHistory::new(self.engine.config.history_capacity);
        let point = match summary {
            Some(summary) => {
                let point = PricePoint::new(self.engine.now_ms(), to_f64(&summary.weighted_price)?)
                    .with_volume(to_f64(&summary.volume)?)
                    .with_source(PriceSource::Listing);
                history.append(point.clone());
                Some(point)
            }
            None => None,
        };
        self.engine.save_history(&history)?;

        tracing::info!("Price history seeded with {} point(s)", history.len());
        Ok(point)
    }
}

fn exceeds_threshold(candidate: f64, current: f64, threshold: f64) -> bool {
    if current == 0.0 {
        return candidate != 0.0;
    }
    ((candidate - current) / current).abs() > threshold
}

fn to_f64(value: &Decimal) -> Result<f64, EngineError> {
    decimal_to_f64(value)
        .ok_or_else(|| EngineError::Validation(format!("price {value} is not representable")))
}

fn rounded(value: Decimal, dp: u32) -> Result<f64, EngineError> {
    to_f64(&round_decimal(value, dp))
}
