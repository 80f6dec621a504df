//! Listing domain — marketplace sell offers and the weighted-price aggregation
//! that turns them into a market price.

pub mod client;

use crate::domain::price::CvtPrice;
use crate::error::EngineError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An active sell offer for CVT, as supplied by the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub amount: Decimal,
    pub price_per_token: Decimal,
    pub active: bool,
    #[serde(default)]
    pub is_expired: bool,
}

impl Listing {
    /// An active, unexpired listing.
    pub fn new(amount: Decimal, price_per_token: Decimal) -> Self {
        Self {
            amount,
            price_per_token,
            active: true,
            is_expired: false,
        }
    }

    /// Whether the listing takes part in price discovery.
    pub fn is_live(&self) -> bool {
        self.active && !self.is_expired
    }

    /// `amount × price_per_token`. `None` if the product overflows.
    pub fn value(&self) -> Option<Decimal> {
        self.amount.checked_mul(self.price_per_token)
    }
}

/// Aggregate over the live listings of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSummary {
    /// Volume-weighted average unit price.
    pub weighted_price: Decimal,
    /// Highest unit price.
    pub high: Decimal,
    /// Lowest unit price.
    pub low: Decimal,
    /// Sum of listing values.
    pub volume: Decimal,
    pub total_amount: Decimal,
    /// Number of live listings.
    pub count: usize,
}

impl ListingSummary {
    /// Summarize the live listings. `None` when there are none, when their
    /// amounts sum to zero, or when the totals overflow `Decimal`.
    pub fn from_listings(listings: &[Listing]) -> Option<Self> {
        Self::try_from_listings(listings).ok().flatten()
    }

    /// Like [`from_listings`](Self::from_listings), but reports overflow as
    /// [`EngineError::Validation`] instead of folding it into `None`.
    pub fn try_from_listings(listings: &[Listing]) -> Result<Option<Self>, EngineError> {
        let mut live = listings.iter().filter(|l| l.is_live()).peekable();
        let Some(first) = live.peek() else {
            return Ok(None);
        };

        let mut summary = ListingSummary {
            weighted_price: Decimal::ZERO,
            high: first.price_per_token,
            low: first.price_per_token,
            volume: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            count: 0,
        };

        for listing in live {
            summary.volume = listing
                .value()
                .and_then(|value| summary.volume.checked_add(value))
                .ok_or_else(|| overflow("listing volume"))?;
            summary.total_amount = summary
                .total_amount
                .checked_add(listing.amount)
                .ok_or_else(|| overflow("listing amount"))?;
            summary.high = summary.high.max(listing.price_per_token);
            summary.low = summary.low.min(listing.price_per_token);
            summary.count += 1;
        }

        if summary.total_amount.is_zero() {
            return Ok(None);
        }
        summary.weighted_price = summary
            .volume
            .checked_div(summary.total_amount)
            .ok_or_else(|| overflow("weighted price"))?;
        Ok(Some(summary))
    }
}

fn overflow(what: &str) -> EngineError {
    EngineError::Validation(format!("{what} overflows the decimal range"))
}

/// Summary of the live listings; see [`ListingSummary::from_listings`].
pub fn summarize(listings: &[Listing]) -> Option<ListingSummary> {
    ListingSummary::from_listings(listings)
}

/// Volume-weighted average unit price of the live listings:
/// `Σ(amount × price) / Σ(amount)`. `None` when no listing is live or the
/// sums overflow.
pub fn compute_weighted_price(listings: &[Listing]) -> Option<Decimal> {
    ListingSummary::from_listings(listings).map(|s| s.weighted_price)
}

/// What a listing-driven update did.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// No live listings; nothing to price.
    NoActiveListings,
    /// The aggregated price, rounded to 4 decimals, is within the change
    /// threshold of the current one.
    BelowThreshold { candidate: f64, current: f64 },
    /// The snapshot was updated and a history point recorded.
    Updated(CvtPrice),
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, UpdateOutcome::Updated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn listing(amount: &str, price: &str) -> Listing {
        Listing::new(dec(amount), dec(price))
    }

    #[test]
    fn test_weighted_price_scenario() {
        let listings = vec![listing("10", "1.00"), listing("30", "1.20")];
        assert_eq!(compute_weighted_price(&listings), Some(dec("1.15")));
    }

    #[test]
    fn test_inactive_and_expired_are_ignored() {
        let mut inactive = listing("1000", "9.00");
        inactive.active = false;
        let mut expired = listing("1000", "0.01");
        expired.is_expired = true;

        let listings = vec![inactive, listing("5", "2.00"), expired];
        let summary = ListingSummary::from_listings(&listings).unwrap();
        assert_eq!(summary.weighted_price, dec("2"));
        assert_eq!(summary.count, 1);
        assert_eq!(summary.high, dec("2.00"));
        assert_eq!(summary.low, dec("2.00"));
    }

    #[test]
    fn test_no_live_listings() {
        assert_eq!(compute_weighted_price(&[]), None);
        let mut expired = listing("10", "1.00");
        expired.is_expired = true;
        assert_eq!(compute_weighted_price(&[expired]), None);
    }

    #[test]
    fn test_zero_total_amount() {
        assert_eq!(compute_weighted_price(&[listing("0", "1.50")]), None);
    }

    #[test]
    fn test_summary_high_low_volume() {
        let listings = vec![listing("10", "1.00"), listing("30", "1.20"), listing("2", "0.90")];
        let summary = ListingSummary::from_listings(&listings).unwrap();
        assert_eq!(summary.high, dec("1.20"));
        assert_eq!(summary.low, dec("0.90"));
        assert_eq!(summary.volume, dec("47.80"));
        assert_eq!(summary.total_amount, dec("42"));
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_weighted_price_bounded_by_unit_prices() {
        let sets: Vec<Vec<Listing>> = vec![
            vec![listing("1", "0.5"), listing("1000", "3.25")],
            vec![listing("0.001", "100"), listing("7", "0.0001"), listing("3", "42")],
            vec![listing("13", "1.1"), listing("13", "1.1")],
            vec![listing("2.5", "0.333"), listing("9.75", "0.777"), listing("1", "0.5")],
        ];
        for listings in sets {
            let summary = ListingSummary::from_listings(&listings).unwrap();
            assert!(summary.weighted_price >= summary.low);
            assert!(summary.weighted_price <= summary.high);
        }
    }

    #[test]
    fn test_listing_serde_from_decimal_strings() {
        let json = r#"{"amount":"10","pricePerToken":"1.20","active":true,"isExpired":false}"#;
        let parsed: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, listing("10", "1.20"));

        let missing_expiry = r#"{"amount":"1","pricePerToken":"2","active":false}"#;
        let parsed: Listing = serde_json::from_str(missing_expiry).unwrap();
        assert!(!parsed.is_expired);
        assert!(!parsed.is_live());
    }

    #[test]
    fn test_overflowing_listing_is_rejected() {
        let huge = vec![listing("100000000000000000000", "1000000000000")];
        assert_eq!(huge[0].value(), None);
        assert_eq!(compute_weighted_price(&huge), None);
        assert!(matches!(
            ListingSummary::try_from_listings(&huge),
            Err(EngineError::Validation(_))
        ));

        let max = Decimal::MAX.to_string();
        let summed = vec![listing(&max, "1"), listing(&max, "1")];
        assert!(ListingSummary::try_from_listings(&summed).is_err());
        assert_eq!(summarize(&summed), None);
    }
}
