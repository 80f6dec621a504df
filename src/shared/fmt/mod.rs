//! Number formatting and rounding for prices, changes and volumes.
//!
//! `decimal` holds the fixed-point rounding applied before values are stored,
//! `num` the human-readable string rendering.

pub mod decimal;
pub mod num;

pub use decimal::{decimal_to_f64, round_to};
pub use num::{format_price, format_price_change, format_usd, PriceTrend};
