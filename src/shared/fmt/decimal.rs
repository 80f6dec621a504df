//! Fixed-point rounding through `rust_decimal::Decimal`.
//!
//! Stored prices are rounded the way they are displayed: to a fixed number of
//! decimal places, ties away from zero, on the shortest decimal form of the
//! `f64`.

use rust_decimal::prelude::*;

/// Round `value` to `dp` decimal places.
///
/// Non-finite values (and values outside `Decimal`'s range) come back
/// unchanged.
pub fn round_to(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| round_decimal(d, dp))
        .and_then(|d| decimal_to_f64(&d))
        .unwrap_or(value)
}

/// Nearest `f64` to a `Decimal`, going through its decimal string so the
/// result matches the literal (`1.2346` → `1.2346`).
pub fn decimal_to_f64(value: &Decimal) -> Option<f64> {
    value.normalize().to_string().parse().ok()
}

/// Round a `Decimal` to `dp` places, ties away from zero.
pub fn round_decimal(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
