//! Parallel minimax guess search
//!
//! Picks the full-matching guess whose worst-case feedback leaves the fewest
//! candidates. The query space depends on how many candidates remain:
//!
//! - more than `large_threshold`: only the configured fixed pool
//! - more than `medium_threshold`: the candidates themselves
//! - otherwise: every permutation of the alphabet
//!
//! Each search builds a fresh pool of `workers` threads, hands every worker an
//! immutable view of the answers plus its own slice of the query space, and
//! collects one best guess per worker before the pool is dropped.

use super::calculator::worst_case_score;
use crate::core::{Alphabet, Matching};
use crate::solver::candidates::split_even;
use crate::solver::{CandidateSet, GameConfig, GuessCatalog};
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

/// Guesses evaluated between deadline checks
const DEADLINE_CHECK_INTERVAL: usize = 64;

/// Which query space a search covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTier {
    /// Too many candidates: search the fixed external pool
    FixedPool,
    /// Search the surviving candidates
    Candidates,
    /// Search every permutation of the alphabet
    FullEnumeration,
}

impl QueryTier {
    /// Tier for a candidate count
    #[must_use]
    pub const fn for_size(size: usize, large_threshold: usize, medium_threshold: usize) -> Self {
        if size > large_threshold {
            Self::FixedPool
        } else if size > medium_threshold {
            Self::Candidates
        } else {
            Self::FullEnumeration
        }
    }
}

impl fmt::Display for QueryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedPool => write!(f, "fixed pool"),
            Self::Candidates => write!(f, "candidates"),
            Self::FullEnumeration => write!(f, "full enumeration"),
        }
    }
}

/// Best guess found by one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub guess: Matching,
    /// Most candidates that can survive this guess
    pub worst_case: usize,
    /// Query space actually searched
    pub tier: QueryTier,
    /// Guesses scored across all workers
    pub evaluated: usize,
    /// True if the deadline cut the search short
    pub timed_out: bool,
}

/// Error type for minimax searches
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Failed to start minimax workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// The part of the query space one worker owns
enum Assignment<'a> {
    Slice(&'a [Matching]),
    /// Every permutation starting with one of these symbol ranks
    LeadingSymbols(Vec<u8>),
}

/// Read-only state shared by every worker of one search
struct SearchContext<'a> {
    answers: &'a [Matching],
    asked: &'a GuessCatalog,
    alphabet: &'a Alphabet,
    deadline: Option<Instant>,
}

/// One worker's local result
#[derive(Debug)]
struct WorkerBest {
    worker: usize,
    best: Option<(Matching, usize)>,
    evaluated: usize,
    timed_out: bool,
}

impl SearchContext<'_> {
    fn run(&self, worker: usize, assignment: Assignment<'_>) -> WorkerBest {
        match assignment {
            Assignment::Slice(guesses) => self.best_of(worker, guesses.iter().copied()),
            Assignment::LeadingSymbols(firsts) => self.best_of(
                worker,
                firsts
                    .into_iter()
                    .flat_map(|first| self.alphabet.permutations_starting_with(first)),
            ),
        }
    }

    /// Scan `guesses`, skipping asked ones, and keep the first lowest score
    fn best_of(&self, worker: usize, guesses: impl Iterator<Item = Matching>) -> WorkerBest {
        let mut result = WorkerBest {
            worker,
            best: None,
            evaluated: 0,
            timed_out: false,
        };

        for (i, guess) in guesses.enumerate() {
            if i % DEADLINE_CHECK_INTERVAL == 0 && self.past_deadline() {
                result.timed_out = true;
                break;
            }
            if self.asked.contains(&guess) {
                continue;
            }

            let score = worst_case_score(&guess, self.answers);
            result.evaluated += 1;
            if result.best.is_none_or(|(_, best)| score < best) {
                result.best = Some((guess, score));
                // Nothing beats a guess that always leaves at most one answer
                if score <= 1 {
                    break;
                }
            }
        }

        result
    }

    fn past_deadline(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Minimax guess selector bound to one game's configuration
pub struct MinimaxEngine<'a> {
    config: &'a GameConfig,
}

impl<'a> MinimaxEngine<'a> {
    #[must_use]
    pub const fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Tier the configuration assigns to `size` candidates
    #[must_use]
    pub const fn tier_for(&self, size: usize) -> QueryTier {
        QueryTier::for_size(
            size,
            self.config.large_threshold,
            self.config.medium_threshold,
        )
    }

    /// Find the unasked guess with the smallest worst-case score
    ///
    /// Returns `Ok(None)` if no guess in the query space could be evaluated
    /// (all of them asked already, or the deadline passed before the first).
    /// Ties go to the lowest worker id, then to the earliest guess within
    /// that worker's slice.
    ///
    /// # Errors
    /// Returns `SearchError::WorkerPool` if the worker threads cannot be started.
    pub fn select_guess(
        &self,
        answers: &CandidateSet,
        asked: &GuessCatalog,
    ) -> Result<Option<SearchOutcome>, SearchError> {
        let workers = self.config.workers.max(1);
        let mut tier = self.tier_for(answers.len());

        if tier == QueryTier::FixedPool && self.config.large_pool.is_empty() {
            warn!(
                candidates = answers.len(),
                "no fixed guess pool configured, searching candidates instead"
            );
            tier = QueryTier::Candidates;
        }

        let assignments: Vec<Assignment<'_>> = match tier {
            QueryTier::FixedPool => split_even(&self.config.large_pool, workers)
                .into_iter()
                .map(Assignment::Slice)
                .collect(),
            QueryTier::Candidates => answers
                .chunks(workers)
                .into_iter()
                .map(Assignment::Slice)
                .collect(),
            QueryTier::FullEnumeration => {
                leading_symbol_partition(self.config.alphabet.len(), workers)
                    .into_iter()
                    .map(Assignment::LeadingSymbols)
                    .collect()
            }
        };

        debug!(
            %tier,
            candidates = answers.len(),
            workers,
            "starting minimax search"
        );

        let context = SearchContext {
            answers: answers.as_slice(),
            asked,
            alphabet: &self.config.alphabet,
            deadline: self.config.search_deadline.map(|d| Instant::now() + d),
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("minimax-{i}"))
            .build()?;
        let results: Mutex<Vec<WorkerBest>> = Mutex::new(Vec::with_capacity(workers));

        pool.scope(|scope| {
            for (worker, assignment) in assignments.into_iter().enumerate() {
                let context = &context;
                let results = &results;
                scope.spawn(move |_| {
                    let best = context.run(worker, assignment);
                    results
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(best);
                });
            }
        });

        let results = results
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(combine(tier, &results))
    }
}

/// Assign leading symbols to workers round-robin
///
/// With as many workers as symbols, worker `i` owns exactly symbol `i`.
fn leading_symbol_partition(symbols: usize, workers: usize) -> Vec<Vec<u8>> {
    let mut partition = vec![Vec::new(); workers.max(1)];
    let count = partition.len();
    for symbol in 0..symbols {
        partition[symbol % count].push(symbol as u8);
    }
    partition
}

/// Reduce per-worker results to the global minimum by `(score, worker id)`
fn combine(tier: QueryTier, results: &[WorkerBest]) -> Option<SearchOutcome> {
    let evaluated = results.iter().map(|r| r.evaluated).sum();
    let timed_out = results.iter().any(|r| r.timed_out);

    if timed_out {
        warn!(%tier, evaluated, "minimax search hit its deadline");
    }

    let outcome = results
        .iter()
        .filter_map(|r| r.best.map(|(guess, score)| (score, r.worker, guess)))
        .min_by_key(|&(score, worker, _)| (score, worker))
        .map(|(worst_case, _, guess)| SearchOutcome {
            guess,
            worst_case,
            tier,
            evaluated,
            timed_out,
        });

    match &outcome {
        Some(found) => debug!(
            guess = %found.guess,
            worst_case = found.worst_case,
            evaluated,
            "minimax search finished"
        ),
        None => warn!(%tier, "minimax search found no unasked guess"),
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Permutations;
    use crate::solver::minimax::worst_case_score;
    use std::time::Duration;

    fn small_config(symbols: &str) -> GameConfig {
        GameConfig::for_alphabet(Alphabet::new(symbols).unwrap())
    }

    fn filtered(alphabet: &Alphabet, guess: &str, correct: usize) -> CandidateSet {
        let mut set = CandidateSet::full(alphabet).unwrap();
        set.filter_by_guess(&alphabet.parse(guess).unwrap(), correct);
        set
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(QueryTier::for_size(10_001, 10_000, 314), QueryTier::FixedPool);
        assert_eq!(QueryTier::for_size(10_000, 10_000, 314), QueryTier::Candidates);
        assert_eq!(QueryTier::for_size(315, 10_000, 314), QueryTier::Candidates);
        assert_eq!(QueryTier::for_size(314, 10_000, 314), QueryTier::FullEnumeration);
        assert_eq!(QueryTier::for_size(1, 10_000, 314), QueryTier::FullEnumeration);
    }

    #[test]
    fn leading_symbols_one_per_worker() {
        let partition = leading_symbol_partition(4, 4);
        assert_eq!(partition, vec![vec![0], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn leading_symbols_round_robin() {
        let partition = leading_symbol_partition(5, 2);
        assert_eq!(partition, vec![vec![0, 2, 4], vec![1, 3]]);
        assert_eq!(leading_symbol_partition(2, 3)[2], Vec::<u8>::new());
    }

    #[test]
    fn full_enumeration_finds_global_minimum() {
        let config = small_config("01234");
        let alphabet = &config.alphabet;
        let answers = filtered(alphabet, "01234", 1);
        let asked = GuessCatalog::new();

        let engine = MinimaxEngine::new(&config);
        assert_eq!(engine.tier_for(answers.len()), QueryTier::FullEnumeration);

        let outcome = engine.select_guess(&answers, &asked).unwrap().unwrap();
        let brute_min = Permutations::new(5)
            .map(|g| worst_case_score(&g, answers.as_slice()))
            .min()
            .unwrap();

        assert_eq!(outcome.tier, QueryTier::FullEnumeration);
        assert_eq!(outcome.worst_case, brute_min);
        assert!(outcome.evaluated <= 120);
        assert!(!outcome.timed_out);
    }

    #[test]
    fn chosen_guess_is_never_worse_than_any_evaluated() {
        let config = small_config("012345").with_thresholds(1000, 10);
        let answers = filtered(&config.alphabet, "012345", 0);
        let engine = MinimaxEngine::new(&config);
        assert_eq!(engine.tier_for(answers.len()), QueryTier::Candidates);

        let outcome = engine
            .select_guess(&answers, &GuessCatalog::new())
            .unwrap()
            .unwrap();

        for guess in answers.iter() {
            assert!(outcome.worst_case <= worst_case_score(guess, answers.as_slice()));
        }
        assert!(answers.contains(&outcome.guess));
    }

    #[test]
    fn ties_go_to_lowest_worker_then_first_guess() {
        // Four answers that every candidate splits identically
        let alphabet = Alphabet::new("0123").unwrap();
        let answers = CandidateSet::from(
            ["0123", "1032", "2301", "3210"]
                .iter()
                .map(|t| alphabet.parse(t).unwrap())
                .collect::<Vec<_>>(),
        );
        let config = GameConfig::for_alphabet(alphabet)
            .with_thresholds(2, 1)
            .with_workers(2);
        let engine = MinimaxEngine::new(&config);

        let outcome = engine
            .select_guess(&answers, &GuessCatalog::new())
            .unwrap()
            .unwrap();
        // Each candidate matches itself fully and the other three nowhere.
        assert_eq!(outcome.guess.to_string(), "0123");
        assert_eq!(outcome.worst_case, 3);
    }

    #[test]
    fn asked_guesses_are_skipped() {
        let alphabet = Alphabet::new("0123").unwrap();
        let answers = CandidateSet::from(vec![
            alphabet.parse("0123").unwrap(),
            alphabet.parse("1032").unwrap(),
        ]);
        let config = GameConfig::for_alphabet(alphabet.clone()).with_thresholds(1, 0);
        let engine = MinimaxEngine::new(&config);

        let mut asked = GuessCatalog::new();
        asked.record(alphabet.parse("0123").unwrap());

        let outcome = engine.select_guess(&answers, &asked).unwrap().unwrap();
        assert_eq!(outcome.guess.to_string(), "1032");
        assert_eq!(outcome.evaluated, 1);
    }

    #[test]
    fn everything_asked_returns_none() {
        let alphabet = Alphabet::new("01").unwrap();
        let answers = CandidateSet::full(&alphabet).unwrap();
        let config = GameConfig::for_alphabet(alphabet.clone());
        let engine = MinimaxEngine::new(&config);

        let mut asked = GuessCatalog::new();
        for guess in alphabet.permutations() {
            asked.record(guess);
        }
        assert_eq!(engine.select_guess(&answers, &asked).unwrap(), None);
    }

    #[test]
    fn fixed_pool_is_searched_when_large() {
        let alphabet = Alphabet::new("01234").unwrap();
        let pool = vec![alphabet.parse("43210").unwrap(), alphabet.parse("10234").unwrap()];
        let config = GameConfig::for_alphabet(alphabet.clone())
            .with_thresholds(10, 5)
            .with_large_pool(pool.clone());
        let answers = CandidateSet::full(&alphabet).unwrap();
        let engine = MinimaxEngine::new(&config);

        let outcome = engine
            .select_guess(&answers, &GuessCatalog::new())
            .unwrap()
            .unwrap();
        assert_eq!(outcome.tier, QueryTier::FixedPool);
        assert!(pool.contains(&outcome.guess));
        assert_eq!(outcome.evaluated, 2);
    }

    #[test]
    fn empty_fixed_pool_degrades_to_candidates() {
        let alphabet = Alphabet::new("01234").unwrap();
        let config = GameConfig::for_alphabet(alphabet.clone()).with_thresholds(10, 5);
        let answers = CandidateSet::full(&alphabet).unwrap();
        let engine = MinimaxEngine::new(&config);

        let outcome = engine
            .select_guess(&answers, &GuessCatalog::new())
            .unwrap()
            .unwrap();
        assert_eq!(outcome.tier, QueryTier::Candidates);
    }

    #[test]
    fn expired_deadline_stops_workers() {
        let alphabet = Alphabet::new("012345").unwrap();
        let config = GameConfig::for_alphabet(alphabet.clone())
            .with_search_deadline(Some(Duration::ZERO));
        let answers = filtered(&alphabet, "012345", 0);
        let engine = MinimaxEngine::new(&config);

        let outcome = engine.select_guess(&answers, &GuessCatalog::new()).unwrap();
        assert_eq!(outcome, None);
    }

    #[test]
    fn single_worker_matches_many_workers() {
        let alphabet = Alphabet::new("012345").unwrap();
        let answers = filtered(&alphabet, "012345", 2);
        let one = GameConfig::for_alphabet(alphabet.clone()).with_workers(1);
        let many = GameConfig::for_alphabet(alphabet).with_workers(6);

        let a = MinimaxEngine::new(&one)
            .select_guess(&answers, &GuessCatalog::new())
            .unwrap()
            .unwrap();
        let b = MinimaxEngine::new(&many)
            .select_guess(&answers, &GuessCatalog::new())
            .unwrap()
            .unwrap();
        assert_eq!(a.worst_case, b.worst_case);
    }
}
