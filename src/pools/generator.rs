//! Random matchings
//!
//! Random hidden answers for demo runs and random guess pools for the
//! large-candidate search tier.

use crate::core::{Alphabet, Matching};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

/// Upper bound on entries reserved up front; larger pools grow on demand
const MAX_PREALLOCATED: usize = 1 << 20;

/// Build an RNG from an optional seed (entropy-seeded when `None`)
#[must_use]
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64)
}

/// A uniformly random permutation of the alphabet
pub fn random_matching<R: Rng + ?Sized>(alphabet: &Alphabet, rng: &mut R) -> Matching {
    let mut ranks: Vec<u8> = (0..alphabet.len() as u8).collect();
    ranks.shuffle(rng);
    Matching::from_ranks_unchecked(&ranks)
}

/// `count` distinct random permutations
///
/// The count is capped at N! so the loop always terminates.
pub fn random_pool<R: Rng + ?Sized>(alphabet: &Alphabet, count: usize, rng: &mut R) -> Vec<Matching> {
    let count = alphabet
        .permutation_count()
        .map_or(count, |total| count.min(total));

    let mut seen = FxHashSet::default();
    let mut pool = Vec::with_capacity(initial_capacity(count));
    while pool.len() < count {
        let matching = random_matching(alphabet, rng);
        if seen.insert(matching) {
            pool.push(matching);
        }
    }
    pool
}

fn initial_capacity(count: usize) -> usize {
    count.min(MAX_PREALLOCATED)
}
