//! Game and search configuration
//!
//! Everything that shapes a game run (alphabet, search tiers, opening guesses,
//! fixed pool, worker count, deadline) lives in one value handed to the game
//! loop at construction.

use crate::core::{Alphabet, Matching};
use std::time::Duration;
use thiserror::Error;

/// Default size above which only the fixed pool is searched
pub const DEFAULT_LARGE_THRESHOLD: usize = 10_000;

/// Default size at or below which the full permutation universe is searched
pub const DEFAULT_MEDIUM_THRESHOLD: usize = 314;

/// Second canonical opening guess for the digit alphabet
const CANONICAL_SECOND_GUESS: [u8; 10] = [4, 5, 7, 9, 1, 0, 8, 6, 2, 3];

/// Configuration for one game run
///
/// ## How Thresholds Work
///
/// ```text
/// if candidates > large_threshold         → FixedPool
/// else if candidates > medium_threshold   → Candidates
/// else                                    → FullEnumeration
/// ```
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Symbols being permuted
    pub alphabet: Alphabet,

    /// Candidates > this search only `large_pool` (default: 10,000)
    pub large_threshold: usize,

    /// Candidates > this search the candidates themselves (default: 314)
    pub medium_threshold: usize,

    /// Guesses played, in order, before minimax takes over
    pub opening_guesses: Vec<Matching>,

    /// Query space for the large tier
    pub large_pool: Vec<Matching>,

    /// Parallel workers per minimax search (default: alphabet size)
    pub workers: usize,

    /// Stop searching after this long and keep the best guess found so far
    pub search_deadline: Option<Duration>,
}

/// Error type for inconsistent configurations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("At least one worker is required")]
    NoWorkers,
    #[error("Medium threshold {medium} exceeds large threshold {large}")]
    ThresholdOrder { medium: usize, large: usize },
    #[error("Opening guess {index} has {actual} symbols, alphabet has {expected}")]
    OpeningLength {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Opening guess {index} repeats an earlier opening guess")]
    OpeningRepeated { index: usize },
    #[error("Pool entry {index} has {actual} symbols, alphabet has {expected}")]
    PoolLength {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

impl GameConfig {
    /// The canonical ten-digit game
    ///
    /// Opening guesses are `0123456789` then `4579108623`. The large pool is
    /// empty; supply one with [`GameConfig::with_large_pool`].
    #[must_use]
    pub fn canonical() -> Self {
        let alphabet = Alphabet::digits();
        let openings = vec![
            alphabet.identity(),
            Matching::from_ranks_unchecked(&CANONICAL_SECOND_GUESS),
        ];
        Self::for_alphabet(alphabet).with_opening_guesses(openings)
    }

    /// Defaults scaled to an arbitrary alphabet
    ///
    /// Opening guesses are the identity and its reversal, which agree in at
    /// most one position.
    #[must_use]
    pub fn for_alphabet(alphabet: Alphabet) -> Self {
        let identity = alphabet.identity();
        let mut opening_guesses = vec![identity];
        if identity.reversed() != identity {
            opening_guesses.push(identity.reversed());
        }

        Self {
            workers: alphabet.len(),
            alphabet,
            large_threshold: DEFAULT_LARGE_THRESHOLD,
            medium_threshold: DEFAULT_MEDIUM_THRESHOLD,
            opening_guesses,
            large_pool: Vec::new(),
            search_deadline: None,
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, large: usize, medium: usize) -> Self {
        self.large_threshold = large;
        self.medium_threshold = medium;
        self
    }

    #[must_use]
    pub fn with_opening_guesses(mut self, openings: Vec<Matching>) -> Self {
        self.opening_guesses = openings;
        self
    }

    #[must_use]
    pub fn with_large_pool(mut self, pool: Vec<Matching>) -> Self {
        self.large_pool = pool;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn with_search_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.search_deadline = deadline;
        self
    }

    /// Check the configuration for internal consistency
    ///
    /// # Errors
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.alphabet.len();

        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.medium_threshold > self.large_threshold {
            return Err(ConfigError::ThresholdOrder {
                medium: self.medium_threshold,
                large: self.large_threshold,
            });
        }
        for (index, guess) in self.opening_guesses.iter().enumerate() {
            if guess.len() != n {
                return Err(ConfigError::OpeningLength {
                    index,
                    expected: n,
                    actual: guess.len(),
                });
            }
            if self.opening_guesses[..index].contains(guess) {
                return Err(ConfigError::OpeningRepeated { index });
            }
        }
        if let Some((index, bad)) = self
            .large_pool
            .iter()
            .enumerate()
            .find(|(_, m)| m.len() != n)
        {
            return Err(ConfigError::PoolLength {
                index,
                expected: n,
                actual: bad.len(),
            });
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::canonical()
    }
}
