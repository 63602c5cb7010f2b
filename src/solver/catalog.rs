//! Query catalogs
//!
//! Append-only history of the probes and guesses already asked, with O(1)
//! membership so selectors can skip repeats.

use crate::core::{Matching, Probe};
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Ordered record of asked queries
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    asked: Vec<T>,
    index: FxHashSet<T>,
}

/// Probes already asked
pub type ProbeCatalog = Catalog<Probe>;

/// Full-matching guesses already asked
pub type GuessCatalog = Catalog<Matching>;

impl<T: Copy + Eq + Hash> Catalog<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            asked: Vec::new(),
            index: FxHashSet::default(),
        }
    }

    /// Append a query; repeats are kept in the history
    pub fn record(&mut self, query: T) {
        self.asked.push(query);
        self.index.insert(query);
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, query: &T) -> bool {
        self.index.contains(query)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.asked.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asked.is_empty()
    }

    #[must_use]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.asked.get(i)
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.asked.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.asked.iter()
    }
}

impl<T: Copy + Eq + Hash> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}
