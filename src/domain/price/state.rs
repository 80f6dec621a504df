//! Snapshot freshness — how a persisted record resolves to a usable price.

use super::CvtPrice;
use crate::store::records::Record;

/// Result of reading the current-price record, with the recovery path taken.
///
/// Every variant carries a usable price; only `Fresh` carries the stored one.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotRead {
    /// Stored snapshot within the staleness threshold.
    Fresh(CvtPrice),
    /// Nothing stored yet; the default.
    Absent(CvtPrice),
    /// Stored snapshot too old to use; the default, plus what was stored.
    Stale { fallback: CvtPrice, stored: CvtPrice },
    /// Stored bytes unreadable; the default, plus the decode/backend error.
    Corrupt { fallback: CvtPrice, reason: String },
}

impl SnapshotRead {
    /// Classify a loaded record.
    ///
    /// A snapshot is stale when it is more than `staleness_threshold_ms` old
    /// at `now_ms`. `default` is the fallback for every non-fresh outcome.
    pub fn resolve(
        record: Record<CvtPrice>,
        default: CvtPrice,
        now_ms: i64,
        staleness_threshold_ms: i64,
    ) -> Self {
        match record {
            Record::Present(stored) if stored.age_ms(now_ms) > staleness_threshold_ms => {
                SnapshotRead::Stale {
                    fallback: default,
                    stored,
                }
            }
            Record::Present(stored) => SnapshotRead::Fresh(stored),
            Record::Absent => SnapshotRead::Absent(default),
            Record::Unreadable(reason) => SnapshotRead::Corrupt {
                fallback: default,
                reason,
            },
        }
    }

    /// The price consumers should use.
    pub fn price(&self) -> &CvtPrice {
        match self {
            SnapshotRead::Fresh(price) | SnapshotRead::Absent(price) => price,
            SnapshotRead::Stale { fallback, .. } | SnapshotRead::Corrupt { fallback, .. } => {
                fallback
            }
        }
    }

    pub fn into_price(self) -> CvtPrice {
        *self.price()
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, SnapshotRead::Fresh(_))
    }
}
