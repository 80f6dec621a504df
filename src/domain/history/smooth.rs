//! Centered moving-average smoothing.

use super::PricePoint;

/// Replace each point's price with the mean price of a centered window.
///
/// The window for index `i` is `[i - w/2, i + ceil(w/2))`, clamped to the
/// slice, so it narrows at both edges instead of padding. Timestamps and all
/// other fields are kept. Input shorter than the window (or a zero window)
/// comes back unchanged.
pub fn smooth_price_data(data: &[PricePoint], window_size: usize) -> Vec<PricePoint> {
    if window_size == 0 || data.len() < window_size {
        return data.to_vec();
    }

    let behind = window_size / 2;
    let ahead = window_size.div_ceil(2);

    data.iter()
        .enumerate()
        .map(|(i, point)| {
            let start = i.saturating_sub(behind);
            let end = (i + ahead).min(data.len());
            let window = &data[start..end];
            let avg = window.iter().map(|p| p.price).sum::<f64>() / window.len() as f64;

            PricePoint {
                price: avg,
                ..point.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_SMOOTHING_WINDOW;
    use crate::shared::PriceSource;

    fn series(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                PricePoint::new(i as i64 * 60_000, p)
                    .with_volume(i as f64)
                    .with_source(PriceSource::Listing)
            })
            .collect()
    }

    #[test]
    fn test_window_three_center_and_edges() {
        let out = smooth_price_data(&series(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3);
        assert_eq!(out[0].price, 1.5);
        assert_eq!(out[2].price, 3.0);
        assert_eq!(out[4].price, 4.5);
    }

    #[test]
    fn test_even_window_leans_backwards() {
        // w = 4: [i-2, i+2)
        let out = smooth_price_data(&series(&[0.0, 4.0, 8.0, 12.0]), 4);
        assert_eq!(out[0].price, 2.0);
        assert_eq!(out[2].price, 6.0);
        assert_eq!(out[3].price, 8.0);
    }

    #[test]
    fn test_preserves_length_timestamps_and_other_fields() {
        let data = series(&[1.0, 9.0, 2.0, 8.0, 3.0, 7.0, 4.0]);
        let out = smooth_price_data(&data, DEFAULT_SMOOTHING_WINDOW);
        assert_eq!(out.len(), data.len());
        for (smoothed, original) in out.iter().zip(&data) {
            assert_eq!(smoothed.timestamp, original.timestamp);
            assert_eq!(smoothed.volume_24h, original.volume_24h);
            assert_eq!(smoothed.source, original.source);
        }
    }

    #[test]
    fn test_short_input_unchanged() {
        let data = series(&[1.0, 5.0]);
        assert_eq!(smooth_price_data(&data, 3), data);
        assert_eq!(smooth_price_data(&data, 0), data);
    }

    #[test]
    fn test_window_one_is_identity() {
        let data = series(&[1.0, 5.0, 2.0]);
        assert_eq!(smooth_price_data(&data, 1), data);
    }
}
