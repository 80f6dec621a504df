//! Up-sampling of irregular observations to evenly spaced chart points.

use super::PricePoint;
use crate::shared::PriceSource;

/// Resample `data` to `target_points` evenly time-spaced points by linear
/// interpolation.
///
/// Only resamples up: empty input gives an empty result, and input that
/// already has `target_points` or more points is returned unchanged. Otherwise
/// a copy is sorted by timestamp, the first and last output points are the
/// first and last observations verbatim, and every interior point is
/// interpolated between its bracketing observations and tagged
/// [`PriceSource::Calculated`]. With two or more observations the output has
/// exactly `target_points` entries.
pub fn interpolate_price_data(data: &[PricePoint], target_points: usize) -> Vec<PricePoint> {
    if data.is_empty() {
        return Vec::new();
    }
    if data.len() >= target_points {
        return data.to_vec();
    }

    let mut sorted = data.to_vec();
    sorted.sort_by_key(|p| p.timestamp);

    // data.len() >= 1 and < target_points, so target_points >= 2.
    let first = &sorted[0];
    let last = &sorted[sorted.len() - 1];
    let start = first.timestamp as f64;
    let step = (last.timestamp as f64 - start) / (target_points - 1) as f64;

    let mut result = Vec::with_capacity(target_points);
    for i in 0..target_points {
        if i == 0 {
            result.push(first.clone());
            continue;
        }
        if i == target_points - 1 {
            result.push(last.clone());
            continue;
        }

        let target_time = start + i as f64 * step;
        if let Some(point) = interpolate_at(&sorted, target_time) {
            result.push(point);
        }
    }

    result
}

/// Interpolated point at `target_time`, from the first pair of neighbouring
/// observations that brackets it.
fn interpolate_at(sorted: &[PricePoint], target_time: f64) -> Option<PricePoint> {
    let pair = sorted.windows(2).find(|w| {
        w[0].timestamp as f64 <= target_time && w[1].timestamp as f64 >= target_time
    })?;
    let (before, after) = (&pair[0], &pair[1]);

    let time_diff = (after.timestamp - before.timestamp) as f64;
    let price = if time_diff == 0.0 {
        before.price
    } else {
        let ratio = (target_time - before.timestamp as f64) / time_diff;
        before.price + (after.price - before.price) * ratio
    };

    Some(PricePoint::new(target_time.round() as i64, price).with_source(PriceSource::Calculated))
}
