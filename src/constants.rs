//! Compile-time constants for the price engine.

/// Store key of the current price record.
pub const PRICE_STORAGE_KEY: &str = "carbon_vault_cvt_price";

/// Store key of the price history record.
pub const PRICE_HISTORY_KEY: &str = "carbon_vault_price_history";

/// Maximum number of points kept in the history ledger.
pub const MAX_HISTORY_POINTS: usize = 1000;

/// Age after which a persisted snapshot is treated as unusable (1 hour).
pub const STALENESS_THRESHOLD_MS: i64 = 3_600_000;

/// Minimum relative change between the stored and the aggregated price
/// before a listing-driven update is recorded (0.1%).
pub const PRICE_CHANGE_THRESHOLD: f64 = 0.001;

/// Contract deployment instant, 2025-11-12T20:00:52.409Z. Lower bound of the
/// `all` time range.
pub const CONTRACT_DEPLOYMENT_MS: i64 = 1_762_977_652_409;

/// Default moving-average window for smoothed chart series.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

// ─── Default snapshot ────────────────────────────────────────────────────────

pub const DEFAULT_CURRENT: f64 = 1.0;
pub const DEFAULT_CHANGE_24H: f64 = 2.5;
pub const DEFAULT_CHANGE_7D: f64 = 8.3;
pub const DEFAULT_HIGH_24H: f64 = 1.05;
pub const DEFAULT_LOW_24H: f64 = 0.95;
pub const DEFAULT_VOLUME_24H: f64 = 45_678.50;
pub const DEFAULT_MARKET_CAP: f64 = 1_000_000.0;
