//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Domain types (serde-ready, matching the persisted records)
//! - `state.rs` — State containers and their update logic
//! - `client.rs` — Sub-client bound to a [`crate::engine::PriceEngine`]
//!
//! plus whatever pure functions the slice serves (history views, listing
//! aggregation).

pub mod history;
pub mod listing;
pub mod price;
