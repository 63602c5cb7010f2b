//! Lexicographic permutation enumeration
//!
//! Restartable and allocation-free per step: each call to `next` advances one
//! `Matching` in place with the classic next-permutation algorithm.

use super::Matching;

/// Iterator over permutations in lexicographic order
///
/// The first `fixed` positions are held constant, so a worker can enumerate
/// only the permutations that start with a given symbol.
#[derive(Debug, Clone)]
pub struct Permutations {
    next: Option<Matching>,
    fixed: usize,
}

impl Permutations {
    /// All permutations of `len` ranks, starting from the identity
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            next: Some(Matching::identity(len)),
            fixed: 0,
        }
    }

    /// Permutations of `len` ranks whose first rank is `first`
    ///
    /// Yields nothing if `first >= len`.
    #[must_use]
    pub fn starting_with(len: usize, first: u8) -> Self {
        if usize::from(first) >= len {
            return Self {
                next: None,
                fixed: 0,
            };
        }

        let mut ranks = Vec::with_capacity(len);
        ranks.push(first);
        ranks.extend((0..len as u8).filter(|&r| r != first));

        Self {
            next: Some(Matching::from_ranks_unchecked(&ranks)),
            fixed: 1,
        }
    }
}

impl Iterator for Permutations {
    type Item = Matching;

    fn next(&mut self) -> Option<Matching> {
        let current = self.next?;

        let mut following = current;
        self.next = if advance(&mut following.ranks_mut()[self.fixed..]) {
            Some(following)
        } else {
            None
        };

        Some(current)
    }
}

/// Step `ranks` to its lexicographic successor; false once it is the last one
fn advance(ranks: &mut [u8]) -> bool {
    if ranks.len() < 2 {
        return false;
    }

    // Longest non-increasing suffix starts at pivot + 1
    let Some(pivot) = (0..ranks.len() - 1).rev().find(|&i| ranks[i] < ranks[i + 1]) else {
        return false;
    };

    // Rightmost element greater than the pivot
    let successor = (pivot + 1..ranks.len())
        .rev()
        .find(|&j| ranks[j] > ranks[pivot])
        .unwrap_or(pivot + 1);

    ranks.swap(pivot, successor);
    ranks[pivot + 1..].reverse();
    true
}
