//! Range selection, summary statistics and CSV export over price points.
//!
//! Everything here is a pure function of its input; the history sub-client
//! feeds it a copy of the ledger.

use super::PricePoint;
use crate::shared::fmt::round_to;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// CSV header row of [`to_csv`].
pub const CSV_HEADER: &str = "Date,Price (USD),Volume 24h,Market Cap";

/// Summary statistics over a set of price points, each rounded to 4 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceStats {
    pub avg_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    /// Population standard deviation of price.
    pub volatility: f64,
}

/// Points with `timestamp >= cutoff`, in stored order.
pub fn points_since(points: &[PricePoint], cutoff: i64) -> Vec<PricePoint> {
    points
        .iter()
        .filter(|p| p.timestamp >= cutoff)
        .cloned()
        .collect()
}

/// Mean, max, min and volatility of `price`. All zeros for empty input.
pub fn calculate_price_stats(points: &[PricePoint]) -> PriceStats {
    if points.is_empty() {
        return PriceStats::default();
    }

    let n = points.len() as f64;
    let avg = points.iter().map(|p| p.price).sum::<f64>() / n;
    let max = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
    let min = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let variance = points.iter().map(|p| (p.price - avg).powi(2)).sum::<f64>() / n;

    PriceStats {
        avg_price: round_to(avg, 4),
        max_price: round_to(max, 4),
        min_price: round_to(min, 4),
        volatility: round_to(variance.sqrt(), 4),
    }
}

/// Render a timestamp like a US-English locale string,
/// e.g. `11/12/2025, 8:00:52 PM`.
pub fn format_locale_timestamp(timestamp_ms: i64, offset: &FixedOffset) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(utc) => utc
            .with_timezone(offset)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Export points as CSV: header row, then one row per point.
///
/// Price always has 4 decimals; volume and market cap have 2 or read `N/A`.
/// The date field contains a comma and is therefore quoted.
pub fn to_csv(points: &[PricePoint], offset: &FixedOffset) -> String {
    let mut lines = Vec::with_capacity(points.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for point in points {
        lines.push(format!(
            "\"{}\",{:.4},{},{}",
            format_locale_timestamp(point.timestamp, offset),
            point.price,
            optional_amount(point.volume_24h),
            optional_amount(point.market_cap),
        ));
    }

    lines.join("\n")
}

fn optional_amount(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}", v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CONTRACT_DEPLOYMENT_MS;

    fn prices(values: &[f64]) -> Vec<PricePoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(i as i64 * 1_000, price))
            .collect()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_points_since_is_inclusive_and_ordered() {
        let points = vec![
            PricePoint::new(300, 1.0),
            PricePoint::new(100, 2.0),
            PricePoint::new(200, 3.0),
        ];
        let ts: Vec<_> = points_since(&points, 200).iter().map(|p| p.timestamp).collect();
        assert_eq!(ts, [300, 200]);
        assert_eq!(points_since(&points, 0).len(), 3);
    }

    #[test]
    fn test_stats_empty_is_zero() {
        assert_eq!(
            calculate_price_stats(&[]),
            PriceStats {
                avg_price: 0.0,
                max_price: 0.0,
                min_price: 0.0,
                volatility: 0.0,
            }
        );
    }

    #[test]
    fn test_stats_population_std_dev() {
        let stats = calculate_price_stats(&prices(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]));
        assert_eq!(stats.avg_price, 5.0);
        assert_eq!(stats.max_price, 9.0);
        assert_eq!(stats.min_price, 2.0);
        assert_eq!(stats.volatility, 2.0);
    }

    #[test]
    fn test_stats_rounded_to_four_places() {
        let stats = calculate_price_stats(&prices(&[1.0, 1.0, 2.0]));
        assert_eq!(stats.avg_price, 1.3333);
        assert_eq!(stats.volatility, 0.4714);
    }

    #[test]
    fn test_stats_single_point() {
        let stats = calculate_price_stats(&prices(&[1.23456]));
        assert_eq!(stats.avg_price, 1.2346);
        assert_eq!(stats.volatility, 0.0);
    }

    #[test]
    fn test_locale_timestamp() {
        assert_eq!(
            format_locale_timestamp(CONTRACT_DEPLOYMENT_MS, &utc()),
            "11/12/2025, 8:00:52 PM"
        );
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            format_locale_timestamp(CONTRACT_DEPLOYMENT_MS, &tokyo),
            "11/13/2025, 5:00:52 AM"
        );
        assert_eq!(format_locale_timestamp(i64::MAX, &utc()), "Invalid Date");
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        assert_eq!(to_csv(&[], &utc()), CSV_HEADER);
    }

    #[test]
    fn test_csv_rows() {
        let points = vec![
            PricePoint::new(CONTRACT_DEPLOYMENT_MS, 1.15).with_volume(46.0),
            PricePoint::new(CONTRACT_DEPLOYMENT_MS + 1_000, 2.0)
                .with_volume(45_678.5)
                .with_market_cap(1_000_000.0),
        ];
        let csv = to_csv(&points, &utc());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Price (USD),Volume 24h,Market Cap");
        assert_eq!(lines[1], "\"11/12/2025, 8:00:52 PM\",1.1500,46.00,N/A");
        assert_eq!(lines[2], "\"11/12/2025, 8:00:53 PM\",2.0000,45678.50,1000000.00");
    }
}
