//! Single-position probe selection
//!
//! A yes/no probe can at best split the candidates in half, and an adversary
//! answers to keep the larger side. So the best probe is the unasked
//! `(position, symbol)` pair that occurs in a number of candidates closest to
//! half of them.

use super::{CandidateSet, ProbeCatalog};
use crate::core::{Matching, Probe};
use rayon::prelude::*;

/// Candidates per rayon task when counting occurrences
const COUNT_CHUNK: usize = 4096;

/// Choose the next probe to ask
///
/// Returns [`default_probe`] when nothing has been asked yet, when only one
/// candidate remains, or when every pair has already been asked.
///
/// Closeness is measured exactly as `|2·count − size|`; ties go to the first
/// pair in position-major, then symbol order.
#[must_use]
pub fn select_probe(candidates: &CandidateSet, asked: &ProbeCatalog, alphabet_len: usize) -> Probe {
    if asked.is_empty() || candidates.len() == 1 {
        return default_probe();
    }

    let occurrences = count_occurrences(candidates.as_slice(), alphabet_len);
    let size = candidates.len();

    occurrences
        .iter()
        .enumerate()
        .map(|(key, &count)| (Probe::from_key(key, alphabet_len), count))
        .filter(|(probe, _)| !asked.contains(probe))
        .min_by_key(|&(_, count)| (2 * count).abs_diff(size))
        .map_or_else(default_probe, |(probe, _)| probe)
}

/// The fixed opening probe: first symbol at the first position
#[must_use]
pub const fn default_probe() -> Probe {
    Probe::new(0, 0)
}

/// Count, for every `(position, symbol)` key, the candidates that contain it
///
/// Indexed by [`Probe::key`].
#[must_use]
pub fn count_occurrences(candidates: &[Matching], alphabet_len: usize) -> Vec<usize> {
    let table_size = alphabet_len * alphabet_len;

    candidates
        .par_chunks(COUNT_CHUNK)
        .fold(
            || vec![0usize; table_size],
            |mut table, chunk| {
                for matching in chunk {
                    for (position, &symbol) in matching.ranks().iter().enumerate() {
                        table[position * alphabet_len + usize::from(symbol)] += 1;
                    }
                }
                table
            },
        )
        .reduce(
            || vec![0usize; table_size],
            |mut left, right| {
                for (l, r) in left.iter_mut().zip(right) {
                    *l += r;
                }
                left
            },
        )
}
