//! Permutation pools
//!
//! External sources of matchings: pool files, arbitrary readers, in-memory
//! lists and random generation. The solver only sees them through the
//! [`PermutationSource`] capability.

pub mod generator;
pub mod loader;

pub use loader::{FilePool, PoolError, ReaderPool};

use crate::core::{Alphabet, Matching};

/// A finite, ordered supply of matchings over a given alphabet
///
/// Implementations validate every entry; callers never receive a matching
/// that is not a permutation of `alphabet`.
pub trait PermutationSource {
    /// Read every matching the source provides, in order
    ///
    /// # Errors
    /// Returns `PoolError` if the source cannot be read or holds an entry that is
    /// not a permutation of `alphabet`.
    fn read_permutations(&mut self, alphabet: &Alphabet) -> Result<Vec<Matching>, PoolError>;
}

impl PermutationSource for Vec<Matching> {
    fn read_permutations(&mut self, alphabet: &Alphabet) -> Result<Vec<Matching>, PoolError> {
        if let Some((index, bad)) = self
            .iter()
            .enumerate()
            .find(|(_, m)| m.len() != alphabet.len())
        {
            return Err(PoolError::WrongLength {
                line: index + 1,
                expected: alphabet.len(),
                actual: bad.len(),
            });
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_source_checks_length() {
        let digits = Alphabet::digits();
        let mut good = vec![digits.identity()];
        assert_eq!(good.read_permutations(&digits).unwrap().len(), 1);

        let mut bad = vec![Matching::identity(4)];
        assert!(matches!(
            bad.read_permutations(&digits),
            Err(PoolError::WrongLength { line: 1, .. })
        ));
    }
}
