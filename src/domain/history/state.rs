//! History ledger state container — bounded, append-only, oldest evicted first.

use super::PricePoint;
use std::collections::VecDeque;

/// Rolling buffer of price observations in insertion order.
///
/// Insertion order is treated as chronological order; the ledger never
/// re-sorts. Holds at most `capacity` points, always the most recently
/// appended ones.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    points: VecDeque<PricePoint>,
    capacity: usize,
}

impl PriceHistory {
    /// Create an empty ledger. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a ledger from stored points, keeping only the last `capacity`.
    pub fn from_points(points: Vec<PricePoint>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        let skip = points.len().saturating_sub(history.capacity);
        history.points.extend(points.into_iter().skip(skip));
        history
    }

    /// Append a point, evicting and returning the oldest if over capacity.
    pub fn append(&mut self, point: PricePoint) -> Option<PricePoint> {
        self.points.push_back(point);
        if self.points.len() > self.capacity {
            self.points.pop_front()
        } else {
            None
        }
    }

    /// All points, or only the last `limit`, in stored order. A limit of 0
    /// means no limit.
    pub fn all(&self, limit: Option<usize>) -> Vec<PricePoint> {
        let skip = match limit {
            Some(l) if l > 0 => self.points.len().saturating_sub(l),
            _ => 0,
        };
        self.points.iter().skip(skip).cloned().collect()
    }

    pub fn points(&self) -> &VecDeque<PricePoint> {
        &self.points
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.back()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_vec(self) -> Vec<PricePoint> {
        self.points.into()
    }
}
