//! Candidate set
//!
//! The matchings still consistent with every piece of feedback applied so far.
//! Only the game loop mutates it, and only between searches; minimax workers
//! borrow immutable slices of it.

use crate::core::{Alphabet, Matching, Probe};
use crate::pools::{PermutationSource, PoolError};
use thiserror::Error;

/// Largest universe `populate_full` will materialize (10!)
pub const MAX_FULL_ENUMERATION: usize = 3_628_800;

/// Error type for candidate-set population
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("Alphabet of {symbols} symbols has more than 3628800 permutations")]
    TooLarge { symbols: usize },
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Collection of matchings still possible as the hidden answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    matchings: Vec<Matching>,
}

impl CandidateSet {
    /// An empty set, to be populated from a pool
    #[must_use]
    pub const fn new() -> Self {
        Self {
            matchings: Vec::new(),
        }
    }

    /// A set holding every permutation of `alphabet`
    ///
    /// # Errors
    /// Returns `CandidateError::TooLarge` if N! exceeds [`MAX_FULL_ENUMERATION`].
    pub fn full(alphabet: &Alphabet) -> Result<Self, CandidateError> {
        let mut set = Self::new();
        set.populate_full(alphabet)?;
        Ok(set)
    }

    /// Reset to every permutation of `alphabet`, in lexicographic order
    ///
    /// # Errors
    /// Returns `CandidateError::TooLarge` if N! exceeds [`MAX_FULL_ENUMERATION`].
    pub fn populate_full(&mut self, alphabet: &Alphabet) -> Result<(), CandidateError> {
        let total = alphabet
            .permutation_count()
            .filter(|&total| total <= MAX_FULL_ENUMERATION)
            .ok_or(CandidateError::TooLarge {
                symbols: alphabet.len(),
            })?;

        self.matchings.clear();
        self.matchings.reserve_exact(total);
        self.matchings.extend(alphabet.permutations());
        Ok(())
    }

    /// Reset to the matchings supplied by an external source
    ///
    /// # Errors
    /// Returns `CandidateError::Pool` if the source fails or holds invalid entries;
    /// the set is left unchanged in that case.
    pub fn populate_from_pool<S: PermutationSource + ?Sized>(
        &mut self,
        source: &mut S,
        alphabet: &Alphabet,
    ) -> Result<(), CandidateError> {
        self.matchings = source.read_permutations(alphabet)?;
        Ok(())
    }

    /// Keep only matchings that agree with the yes/no answer to `probe`
    ///
    /// Returns the number of matchings removed.
    pub fn filter_by_probe(&mut self, probe: Probe, was_match: bool) -> usize {
        let before = self.matchings.len();
        self.matchings
            .retain(|m| probe.is_contained_in(m) == was_match);
        before - self.matchings.len()
    }

    /// Keep only matchings sharing exactly `num_correct` positions with `guess`
    ///
    /// Returns the number of matchings removed.
    pub fn filter_by_guess(&mut self, guess: &Matching, num_correct: usize) -> usize {
        let before = self.matchings.len();
        self.matchings
            .retain(|m| guess.agreement_count(m) == num_correct);
        before - self.matchings.len()
    }

    /// Split into exactly `k` contiguous slices whose sizes differ by at most one
    ///
    /// The first `len % k` slices get the extra element. Order is preserved and
    /// some slices are empty when `len < k`. `k == 0` is treated as 1.
    #[must_use]
    pub fn chunks(&self, k: usize) -> Vec<&[Matching]> {
        split_even(&self.matchings, k)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchings.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchings.is_empty()
    }

    /// An arbitrary remaining matching (the first one)
    #[must_use]
    pub fn sample(&self) -> Option<&Matching> {
        self.matchings.first()
    }

    #[must_use]
    pub fn contains(&self, matching: &Matching) -> bool {
        self.matchings.contains(matching)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Matching> {
        self.matchings.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Matching] {
        &self.matchings
    }
}

impl From<Vec<Matching>> for CandidateSet {
    fn from(matchings: Vec<Matching>) -> Self {
        Self { matchings }
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Matching;
    type IntoIter = std::slice::Iter<'a, Matching>;

    fn into_iter(self) -> Self::IntoIter {
        self.matchings.iter()
    }
}

/// Split `items` into `k` contiguous near-equal slices
pub(crate) fn split_even<T>(items: &[T], k: usize) -> Vec<&[T]> {
    let k = k.max(1);
    let base = items.len() / k;
    let extra = items.len() % k;

    let mut chunks = Vec::with_capacity(k);
    let mut start = 0;
    for i in 0..k {
        let size = base + usize::from(i < extra);
        chunks.push(&items[start..start + size]);
        start += size;
    }
    chunks
}
