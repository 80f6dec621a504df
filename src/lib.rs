//! # CVT Price Engine
//!
//! Price aggregation and time-series engine for the CVT token.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Shared** — Time ranges, price sources, clocks, number formatting
//! 2. **Store** — `KeyValueStore` trait for the two persisted records, plus `MemoryStore`
//! 3. **Domain** — Vertical slices: price snapshot, history ledger + chart views, listings
//! 4. **Engine** — `PriceEngine`, the context object with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cvt_price_engine::prelude::*;
//!
//! let engine = PriceEngine::builder().build()?;
//!
//! engine.aggregator().update_from_listings(&listings)?;
//! let price = engine.snapshot().current();
//! let last_day = engine.history().for_range(TimeRange::Day1);
//! let chart = interpolate_price_data(&last_day, 100);
//! ```

// ── Layer 1: Shared ──────────────────────────────────────────────────────────

/// Shared enums, clocks and formatting used across all domains.
pub mod shared;

/// Compile-time constants: storage keys, defaults, deployment epoch.
pub mod constants;

/// Unified engine error types.
pub mod error;

// ── Layer 2: Store ───────────────────────────────────────────────────────────

/// Key/value byte store abstraction for persisted records.
pub mod store;

// ── Layer 3: Domain ──────────────────────────────────────────────────────────

/// Domain modules (vertical slices): types, state containers, sub-clients.
pub mod domain;

// ── Layer 4: Engine ──────────────────────────────────────────────────────────

/// `PriceEngine` — the primary entry point.
pub mod engine;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared
    pub use crate::shared::clock::{Clock, ManualClock, SystemClock};
    pub use crate::shared::fmt::{format_price, format_price_change, round_to, PriceTrend};
    pub use crate::shared::{PriceSource, TimeRange};

    // Domain types — price snapshot
    pub use crate::domain::price::{CvtPrice, PriceUpdate, SnapshotRead};

    // Domain types — history + derived views
    pub use crate::domain::history::query::{calculate_price_stats, PriceStats};
    pub use crate::domain::history::resample::interpolate_price_data;
    pub use crate::domain::history::smooth::smooth_price_data;
    pub use crate::domain::history::{PriceHistory, PricePoint};

    // Domain types — listings
    pub use crate::domain::listing::{
        compute_weighted_price, summarize, Listing, ListingSummary, UpdateOutcome,
    };

    // Store
    pub use crate::store::{KeyValueStore, MemoryStore};

    // Errors
    pub use crate::error::{EngineError, StoreError};

    // Engine + sub-clients
    pub use crate::engine::{
        AggregatorClient, EngineConfig, HistoryClient, PriceEngine, PriceEngineBuilder,
        SnapshotClient,
    };
}
