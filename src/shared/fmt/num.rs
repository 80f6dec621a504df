//! Number formatting utilities for human-readable display.
//!
//! Handles f64 prices, percentage changes and USD amounts with thousands
//! separators.

/// Direction of a price change, for presentation styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceTrend {
    Up,
    Down,
    Flat,
}

impl PriceTrend {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else if change < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }
}

/// Format a price with a fixed number of decimals (`1.5` → `"1.50"`).
pub fn format_price(price: f64, decimals: usize) -> String {
    format!("{:.1$}", price, decimals)
}

/// Format a percentage change with an explicit sign (`2.5` → `"+2.50%"`).
pub fn format_price_change(change: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, change)
}

/// Format a USD amount with two decimals and thousands separators
/// (`45678.5` → `"$45,678.50"`).
pub fn format_usd(amount: f64) -> String {
    let formatted = display_formatted_string(format!("{:.2}", amount.abs()));
    if amount < 0.0 {
        format!("-${}", formatted)
    } else {
        format!("${}", formatted)
    }
}

/// Adds thousands separators to the integer part of a formatted number.
pub fn display_formatted_string(formatted: String) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };

    let (integer, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let grouped = integer
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    match fraction {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
