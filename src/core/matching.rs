//! Matching (permutation) representation
//!
//! A `Matching` stores one permutation of an alphabet as symbol ranks. Rank `r`
//! means "the r-th symbol of the alphabet", so the same value works for any
//! alphabet of the same size. Rendering back to symbols is the alphabet's job.

use std::fmt;
use thiserror::Error;

/// Largest alphabet a `Matching` can hold
pub const MAX_SYMBOLS: usize = 16;

/// A permutation of `len` symbol ranks
///
/// Immutable and `Copy`: ten-symbol matchings are 17 bytes, so the full
/// 10! candidate universe fits in a single flat `Vec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Matching {
    ranks: [u8; MAX_SYMBOLS],
    len: u8,
}

/// Error type for invalid matchings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    #[error("Matching must have exactly {expected} symbols, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Symbol '{0}' is not part of the alphabet")]
    UnknownSymbol(char),
    #[error("Symbol '{0}' appears more than once")]
    RepeatedSymbol(char),
    #[error("Rank {rank} is out of range for a {len}-symbol matching")]
    RankOutOfRange { rank: u8, len: usize },
    #[error("Rank {0} appears more than once")]
    RepeatedRank(u8),
}

impl Matching {
    /// Build a matching from ranks, validating that they form a permutation of `0..len`
    ///
    /// # Errors
    /// Returns `MatchingError` if the slice is longer than [`MAX_SYMBOLS`], contains a
    /// rank `>= len`, or repeats a rank.
    ///
    /// # Examples
    /// ```
    /// use matching_minimax::core::Matching;
    ///
    /// let m = Matching::from_ranks(&[2, 0, 1]).unwrap();
    /// assert_eq!(m.len(), 3);
    /// assert!(Matching::from_ranks(&[0, 0, 1]).is_err());
    /// ```
    pub fn from_ranks(ranks: &[u8]) -> Result<Self, MatchingError> {
        let len = ranks.len();
        if len > MAX_SYMBOLS {
            return Err(MatchingError::InvalidLength {
                expected: MAX_SYMBOLS,
                actual: len,
            });
        }

        let mut seen = [false; MAX_SYMBOLS];
        for &rank in ranks {
            let index = usize::from(rank);
            if index >= len {
                return Err(MatchingError::RankOutOfRange { rank, len });
            }
            if seen[index] {
                return Err(MatchingError::RepeatedRank(rank));
            }
            seen[index] = true;
        }

        Ok(Self::from_ranks_unchecked(ranks))
    }

    /// Build a matching from ranks already known to be a permutation
    pub(crate) fn from_ranks_unchecked(ranks: &[u8]) -> Self {
        debug_assert!(ranks.len() <= MAX_SYMBOLS);
        let mut stored = [0u8; MAX_SYMBOLS];
        stored[..ranks.len()].copy_from_slice(ranks);
        Self {
            ranks: stored,
            len: ranks.len() as u8,
        }
    }

    /// The identity permutation `0, 1, …, len-1`
    #[must_use]
    pub fn identity(len: usize) -> Self {
        debug_assert!(len <= MAX_SYMBOLS);
        let mut ranks = [0u8; MAX_SYMBOLS];
        for (i, slot) in ranks.iter_mut().enumerate().take(len) {
            *slot = i as u8;
        }
        Self {
            ranks,
            len: len as u8,
        }
    }

    /// Number of positions
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// True for the zero-length matching
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Symbol ranks in position order
    #[inline]
    #[must_use]
    pub fn ranks(&self) -> &[u8] {
        &self.ranks[..self.len()]
    }

    /// Symbol rank at `position`
    ///
    /// # Panics
    /// Panics if `position >= MAX_SYMBOLS`
    #[inline]
    #[must_use]
    pub const fn rank_at(&self, position: usize) -> u8 {
        self.ranks[position]
    }

    /// Count the positions where `self` and `other` place the same symbol
    ///
    /// Symmetric and bounded by the shorter length. This is both the feedback
    /// for a full guess and the metric minimax scores guesses with.
    ///
    /// # Examples
    /// ```
    /// use matching_minimax::core::Alphabet;
    ///
    /// let digits = Alphabet::digits();
    /// let a = digits.parse("0123456789").unwrap();
    /// let b = digits.parse("1032456789").unwrap();
    /// assert_eq!(a.agreement_count(&b), 6);
    /// ```
    #[inline]
    #[must_use]
    pub fn agreement_count(&self, other: &Self) -> usize {
        self.ranks()
            .iter()
            .zip(other.ranks())
            .filter(|(a, b)| a == b)
            .count()
    }

    /// Reverse the position order
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut ranks = self.ranks;
        ranks[..self.len()].reverse();
        Self {
            ranks,
            len: self.len,
        }
    }

    /// Mutable rank storage for the permutation iterator
    pub(crate) fn ranks_mut(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.ranks[..len]
    }
}

impl fmt::Display for Matching {
    /// Ranks as hexadecimal digits, which for the digit alphabet is the matching itself
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &rank in self.ranks() {
            let digit = char::from_digit(u32::from(rank), 16).unwrap_or('?');
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matching(ranks: &[u8]) -> Matching {
        Matching::from_ranks(ranks).unwrap()
    }

    #[test]
    fn from_ranks_valid() {
        let m = matching(&[3, 1, 0, 2]);
        assert_eq!(m.len(), 4);
        assert_eq!(m.ranks(), &[3, 1, 0, 2]);
        assert_eq!(m.rank_at(0), 3);
    }

    #[test]
    fn from_ranks_rejects_out_of_range() {
        assert_eq!(
            Matching::from_ranks(&[0, 1, 5]),
            Err(MatchingError::RankOutOfRange { rank: 5, len: 3 })
        );
    }

    #[test]
    fn from_ranks_rejects_repeats() {
        assert_eq!(
            Matching::from_ranks(&[0, 1, 1]),
            Err(MatchingError::RepeatedRank(1))
        );
    }

    #[test]
    fn from_ranks_rejects_oversized() {
        let ranks: Vec<u8> = (0..17).collect();
        assert!(matches!(
            Matching::from_ranks(&ranks),
            Err(MatchingError::InvalidLength { .. })
        ));
    }

    #[test]
    fn identity_is_sorted() {
        assert_eq!(Matching::identity(5).ranks(), &[0, 1, 2, 3, 4]);
        assert!(Matching::identity(0).is_empty());
    }

    #[test]
    fn agreement_with_self_is_length() {
        let m = matching(&[4, 2, 0, 1, 3]);
        assert_eq!(m.agreement_count(&m), 5);
    }

    #[test]
    fn agreement_counts_equal_positions() {
        // Positions 2..=9 agree, positions 0 and 1 are swapped.
        let a = matching(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let b = matching(&[1, 0, 3, 2, 4, 5, 6, 7, 8, 9]);
        assert_eq!(a.agreement_count(&b), 6);
    }

    #[test]
    fn reversed_flips_order() {
        let m = matching(&[0, 1, 2, 3]);
        assert_eq!(m.reversed().ranks(), &[3, 2, 1, 0]);
        assert_eq!(m.agreement_count(&m.reversed()), 0);
    }

    #[test]
    fn display_uses_hex_digits() {
        assert_eq!(matching(&[2, 0, 1]).to_string(), "201");
        let wide: Vec<u8> = (0..12).rev().collect();
        assert_eq!(matching(&wide).to_string(), "ba9876543210");
    }

    fn permutation_of(len: usize) -> impl Strategy<Value = Matching> {
        Just((0..len as u8).collect::<Vec<u8>>())
            .prop_shuffle()
            .prop_map(|ranks| Matching::from_ranks(&ranks).unwrap())
    }

    proptest! {
        #[test]
        fn agreement_is_symmetric(a in permutation_of(10), b in permutation_of(10)) {
            prop_assert_eq!(a.agreement_count(&b), b.agreement_count(&a));
        }

        #[test]
        fn agreement_is_bounded(a in permutation_of(10), b in permutation_of(10)) {
            prop_assert!(a.agreement_count(&b) <= 10);
        }

        #[test]
        fn agreement_never_equals_len_minus_one(a in permutation_of(8), b in permutation_of(8)) {
            // Two permutations cannot differ in exactly one position.
            prop_assert_ne!(a.agreement_count(&b), 7);
        }
    }
}
