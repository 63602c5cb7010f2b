//! Single-position probe
//!
//! A probe asks "does the hidden matching place this symbol at this position?"
//! and is answered with yes or no.

use super::Matching;
use std::fmt;

/// A `(position, symbol rank)` question
///
/// The derived ordering is position-major, then symbol rank, which is the same
/// total order as the key `position * N + symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Probe {
    position: u8,
    symbol: u8,
}

impl Probe {
    #[inline]
    #[must_use]
    pub const fn new(position: u8, symbol: u8) -> Self {
        Self { position, symbol }
    }

    #[inline]
    #[must_use]
    pub const fn position(self) -> usize {
        self.position as usize
    }

    /// Rank of the probed symbol
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> u8 {
        self.symbol
    }

    /// Dense index `position * alphabet_len + symbol`, usable as a table key
    #[inline]
    #[must_use]
    pub const fn key(self, alphabet_len: usize) -> usize {
        self.position as usize * alphabet_len + self.symbol as usize
    }

    /// Inverse of [`Probe::key`]
    #[inline]
    #[must_use]
    pub const fn from_key(key: usize, alphabet_len: usize) -> Self {
        Self {
            position: (key / alphabet_len) as u8,
            symbol: (key % alphabet_len) as u8,
        }
    }

    /// True if `matching` places the probed symbol at the probed position
    #[inline]
    #[must_use]
    pub fn is_contained_in(self, matching: &Matching) -> bool {
        self.position() < matching.len() && matching.rank_at(self.position()) == self.symbol
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.position, self.symbol)
    }
}
