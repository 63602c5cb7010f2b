//! Pool generation command
//!
//! Writes distinct random permutations, one per line, in the format the pool
//! loader reads back.

use crate::core::{Alphabet, Matching};
use crate::pools::generator::{random_pool, rng_from_seed};
use std::io::{self, Write};

/// Generate `count` distinct random permutations (capped at N!)
#[must_use]
pub fn generate_pool(alphabet: &Alphabet, count: usize, seed: Option<u64>) -> Vec<Matching> {
    random_pool(alphabet, count, &mut rng_from_seed(seed))
}

/// Write one permutation per line
///
/// # Errors
/// Returns any write error from `out`.
pub fn write_pool<W: Write>(out: &mut W, alphabet: &Alphabet, pool: &[Matching]) -> io::Result<()> {
    for matching in pool {
        writeln!(out, "{}", alphabet.render(matching))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::{PermutationSource, ReaderPool};
    use std::io::Cursor;

    #[test]
    fn written_pool_reads_back() {
        let alphabet = Alphabet::new("abcdef").unwrap();
        let pool = generate_pool(&alphabet, 25, Some(11));
        assert_eq!(pool.len(), 25);

        let mut buffer = Vec::new();
        write_pool(&mut buffer, &alphabet, &pool).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 25);
        assert!(text.lines().all(|line| line.len() == 6));

        let mut source = ReaderPool::new(Cursor::new(text), "generated");
        assert_eq!(source.read_permutations(&alphabet).unwrap(), pool);
    }

    #[test]
    fn count_is_capped_at_factorial() {
        let alphabet = Alphabet::new("xyz").unwrap();
        assert_eq!(generate_pool(&alphabet, 100, Some(1)).len(), 6);
    }
}
