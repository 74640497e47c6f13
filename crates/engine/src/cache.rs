//! Transposition cache keyed by position fingerprint.
//!
//! Every stored score was computed under one weight vector; binding the
//! cache to different weights discards all entries.

use std::collections::HashMap;

use crate::weights::WeightVector;

/// How a stored score relates to the true minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside its window.
    Exact,
    /// Fail-high: the true value is at least the score.
    Lower,
    /// Fail-low: the true value is at most the score.
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub score: i32,
    pub depth: u8,
    pub bound: Bound,
}

impl CacheEntry {
    /// The score, if it answers a search of `depth` plies inside
    /// `(alpha, beta)`.
    pub fn usable(&self, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Lower if self.score >= beta => Some(self.score),
            Bound::Upper if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct TranspositionCache {
    weights: Option<WeightVector>,
    entries: HashMap<String, CacheEntry>,
    hits: u64,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate the cache with `weights`, clearing it if they differ from
    /// the ones its entries were computed under.
    pub fn bind(&mut self, weights: &WeightVector) {
        if self.weights.as_ref() != Some(weights) {
            self.entries.clear();
            self.weights = Some(*weights);
        }
    }

    pub fn probe(&mut self, key: &str, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        let score = self.entries.get(key)?.usable(depth, alpha, beta)?;
        self.hits += 1;
        Some(score)
    }

    /// Store a result. A shallower result never replaces a deeper one.
    pub fn store(&mut self, key: String, depth: u8, score: i32, bound: Bound) {
        let entry = CacheEntry { score, depth, bound };
        match self.entries.get_mut(&key) {
            Some(old) if old.depth > depth => {}
            Some(old) => *old = entry,
            None => {
                self.entries.insert(key, entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful probes since creation.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
