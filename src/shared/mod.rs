//! Shared enums and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize to the
//! same tokens the persisted records and the presentation layer use.

pub mod clock;
pub mod fmt;

use serde::{Deserialize, Serialize};

// ─── PriceSource ─────────────────────────────────────────────────────────────

/// Where a history point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    Listing,
    Transaction,
    Calculated,
    Manual,
}

impl PriceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Transaction => "transaction",
            Self::Calculated => "calculated",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── TimeRange ───────────────────────────────────────────────────────────────

/// Chart time window, counted back from "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "5s")]
    Second5,
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "1h")]
    Hour1,
    #[default]
    #[serde(rename = "24h")]
    Day1,
    #[serde(rename = "7d")]
    Day7,
    #[serde(rename = "30d")]
    Day30,
    /// Everything since contract deployment.
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    pub const ALL: [TimeRange; 8] = [
        Self::Second5,
        Self::Minute1,
        Self::Minute5,
        Self::Hour1,
        Self::Day1,
        Self::Day7,
        Self::Day30,
        Self::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Second5 => "5s",
            Self::Minute1 => "1m",
            Self::Minute5 => "5m",
            Self::Hour1 => "1h",
            Self::Day1 => "24h",
            Self::Day7 => "7d",
            Self::Day30 => "30d",
            Self::All => "all",
        }
    }

    /// Parse a range token. Unknown tokens yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == token)
    }

    /// Window length in milliseconds. `None` for [`TimeRange::All`], which is
    /// bounded by the deployment epoch instead.
    pub fn duration_ms(&self) -> Option<i64> {
        const SECOND: i64 = 1000;
        const MINUTE: i64 = 60 * SECOND;
        const HOUR: i64 = 60 * MINUTE;
        const DAY: i64 = 24 * HOUR;

        match self {
            Self::Second5 => Some(5 * SECOND),
            Self::Minute1 => Some(MINUTE),
            Self::Minute5 => Some(5 * MINUTE),
            Self::Hour1 => Some(HOUR),
            Self::Day1 => Some(DAY),
            Self::Day7 => Some(7 * DAY),
            Self::Day30 => Some(30 * DAY),
            Self::All => None,
        }
    }

    /// Lowest timestamp (inclusive) that falls inside this range.
    pub fn cutoff(&self, now_ms: i64, deployment_epoch_ms: i64) -> i64 {
        match self.duration_ms() {
            Some(duration) => now_ms - duration,
            None => deployment_epoch_ms,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
