//! Game loop
//!
//! Drives one game as a small state machine:
//!
//! ```text
//! Start → ProbeStage → FilterAfterProbe → GuessStage → FilterAfterGuess
//!            ↑                                                │
//!            └──────────────── not solved ────────────────────┘
//! ```
//!
//! `Solved` and `Impossible` are terminal. The candidate set is only filtered
//! here, and never while a minimax search is borrowing it.

use super::candidates::{CandidateError, CandidateSet};
use super::catalog::{GuessCatalog, ProbeCatalog};
use super::config::{ConfigError, GameConfig};
use super::feedback::{FeedbackError, FeedbackSource};
use super::minimax::{MinimaxEngine, QueryTier, SearchError};
use super::probe_selector::select_probe;
use crate::core::{Matching, Probe};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Error type for running a game
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Candidates(#[from] CandidateError),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
    #[error("Guess feedback {value} is out of range 0..={max}")]
    FeedbackOutOfRange { value: usize, max: usize },
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Where the game loop currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameState {
    Start,
    ProbeStage,
    FilterAfterProbe { probe: Probe, matched: bool },
    GuessStage,
    FilterAfterGuess { guess: Matching, correct: usize },
    Solved(Matching),
    Impossible,
}

impl GameState {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Solved(_) | Self::Impossible)
    }
}

/// How a guess was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOrigin {
    /// Only one candidate was left
    SoleCandidate,
    /// Configured opening guess at this index
    Opening(usize),
    /// Minimax search result
    Minimax {
        tier: QueryTier,
        worst_case: usize,
        timed_out: bool,
    },
    /// The search evaluated nothing; first remaining candidate
    Fallback,
}

/// The guess half of a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    pub guess: Matching,
    pub origin: GuessOrigin,
    pub correct: usize,
    /// Candidates left after filtering by this guess
    pub remaining: usize,
}

/// One probe plus (usually) one guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// 1-based round number
    pub number: usize,
    pub probe: Probe,
    pub probe_matched: bool,
    /// Candidates left after filtering by the probe
    pub after_probe: usize,
    /// Missing only when the probe answer emptied the candidate set
    pub guess: Option<GuessRecord>,
}

/// Terminal result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Solved(Matching),
    Impossible,
}

/// Everything a finished game produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub outcome: GameOutcome,
    pub rounds: Vec<Round>,
}

impl GameReport {
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self.outcome, GameOutcome::Solved(_))
    }
}

/// One game in progress
pub struct Game<'a> {
    config: &'a GameConfig,
    candidates: CandidateSet,
    probes: ProbeCatalog,
    guesses: GuessCatalog,
    rounds: Vec<Round>,
    state: GameState,
}

impl<'a> Game<'a> {
    /// Start a game over every permutation of the configured alphabet
    ///
    /// # Errors
    /// Returns `GameError::Config` for an inconsistent configuration, or
    /// `GameError::Candidates` if the alphabet is too large to enumerate.
    pub fn new(config: &'a GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let candidates = CandidateSet::full(&config.alphabet)?;
        Ok(Self::from_parts(config, candidates))
    }

    /// Start a game over a prepared candidate set (for example one read from a pool)
    ///
    /// # Errors
    /// Returns `GameError::Config` for an inconsistent configuration.
    pub fn with_candidates(
        config: &'a GameConfig,
        candidates: CandidateSet,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::from_parts(config, candidates))
    }

    fn from_parts(config: &'a GameConfig, candidates: CandidateSet) -> Self {
        Self {
            config,
            candidates,
            probes: ProbeCatalog::new(),
            guesses: GuessCatalog::new(),
            rounds: Vec::new(),
            state: GameState::Start,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    #[must_use]
    pub const fn probes(&self) -> &ProbeCatalog {
        &self.probes
    }

    #[must_use]
    pub const fn guesses(&self) -> &GuessCatalog {
        &self.guesses
    }

    /// Perform one state transition
    ///
    /// Terminal states are left unchanged.
    ///
    /// # Errors
    /// Returns `GameError` if the source fails, reports guess feedback above
    /// the alphabet size, or the minimax workers cannot be started. The state
    /// is unchanged in that case.
    pub fn advance<S: FeedbackSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<&GameState, GameError> {
        let next = match &self.state {
            GameState::Start => {
                debug!(candidates = self.candidates.len(), "game started");
                GameState::ProbeStage
            }
            GameState::ProbeStage => {
                let probe = select_probe(&self.candidates, &self.probes, self.config.alphabet.len());
                let matched = source.probe_feedback(probe)?;
                self.probes.record(probe);
                GameState::FilterAfterProbe { probe, matched }
            }
            &GameState::FilterAfterProbe { probe, matched } => {
                self.candidates.filter_by_probe(probe, matched);
                let remaining = self.candidates.len();
                debug!(
                    round = self.rounds.len() + 1,
                    %probe,
                    matched,
                    remaining,
                    "probe applied"
                );
                self.rounds.push(Round {
                    number: self.rounds.len() + 1,
                    probe,
                    probe_matched: matched,
                    after_probe: remaining,
                    guess: None,
                });
                self.impossible_or(GameState::GuessStage, source.is_truthful())
            }
            GameState::GuessStage => {
                let (guess, origin) = self.next_guess()?;
                let correct = source.guess_feedback(&guess)?;
                let max = self.config.alphabet.len();
                if correct > max {
                    return Err(GameError::FeedbackOutOfRange { value: correct, max });
                }
                self.guesses.record(guess);
                if let Some(round) = self.rounds.last_mut() {
                    round.guess = Some(GuessRecord {
                        guess,
                        origin,
                        correct,
                        remaining: 0,
                    });
                }
                GameState::FilterAfterGuess { guess, correct }
            }
            &GameState::FilterAfterGuess { guess, correct } => {
                self.candidates.filter_by_guess(&guess, correct);
                let remaining = self.candidates.len();
                if let Some(record) = self.rounds.last_mut().and_then(|r| r.guess.as_mut()) {
                    record.remaining = remaining;
                }
                debug!(%guess, correct, remaining, "guess applied");

                if remaining > 0 && correct == self.config.alphabet.len() {
                    info!(answer = %guess, rounds = self.rounds.len(), "solved");
                    GameState::Solved(guess)
                } else {
                    self.impossible_or(GameState::ProbeStage, source.is_truthful())
                }
            }
            GameState::Solved(_) | GameState::Impossible => return Ok(&self.state),
        };

        self.state = next;
        Ok(&self.state)
    }

    /// Advance until the game reaches a terminal state
    ///
    /// # Errors
    /// Returns the first `GameError` raised by [`Game::advance`].
    pub fn run<S: FeedbackSource + ?Sized>(mut self, source: &mut S) -> Result<GameReport, GameError> {
        while !self.state.is_terminal() {
            self.advance(source)?;
        }

        let outcome = match self.state {
            GameState::Solved(answer) => GameOutcome::Solved(answer),
            _ => GameOutcome::Impossible,
        };
        Ok(GameReport {
            outcome,
            rounds: self.rounds,
        })
    }

    /// Choose the next full-matching guess
    ///
    /// # Errors
    /// Returns `GameError::Search` if the minimax workers cannot be started.
    pub fn next_guess(&self) -> Result<(Matching, GuessOrigin), GameError> {
        if let [sole] = self.candidates.as_slice() {
            return Ok((*sole, GuessOrigin::SoleCandidate));
        }

        let index = self.guesses.len();
        if let Some(&opening) = self.config.opening_guesses.get(index) {
            return Ok((opening, GuessOrigin::Opening(index)));
        }

        let engine = MinimaxEngine::new(self.config);
        if let Some(found) = engine.select_guess(&self.candidates, &self.guesses)? {
            return Ok((
                found.guess,
                GuessOrigin::Minimax {
                    tier: found.tier,
                    worst_case: found.worst_case,
                    timed_out: found.timed_out,
                },
            ));
        }

        warn!(
            candidates = self.candidates.len(),
            "no guess evaluated, falling back to first candidate"
        );
        let fallback = self
            .candidates
            .sample()
            .copied()
            .unwrap_or_else(|| self.config.alphabet.identity());
        Ok((fallback, GuessOrigin::Fallback))
    }

    fn impossible_or(&self, next: GameState, truthful: bool) -> GameState {
        if !self.candidates.is_empty() {
            return next;
        }
        if truthful {
            error!(
                rounds = self.rounds.len(),
                "truthful feedback emptied the candidate set"
            );
        } else {
            info!(rounds = self.rounds.len(), "feedback is contradictory");
        }
        GameState::Impossible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Alphabet;
    use crate::pools::generator::{random_pool, rng_from_seed};
    use crate::solver::{HiddenAnswer, default_probe};
    use std::collections::VecDeque;

    /// Replays fixed answers in order
    struct Scripted {
        probes: VecDeque<bool>,
        guesses: VecDeque<usize>,
    }

    impl Scripted {
        fn new(probes: &[bool], guesses: &[usize]) -> Self {
            Self {
                probes: probes.iter().copied().collect(),
                guesses: guesses.iter().copied().collect(),
            }
        }
    }

    impl FeedbackSource for Scripted {
        fn probe_feedback(&mut self, _: Probe) -> Result<bool, FeedbackError> {
            self.probes.pop_front().ok_or(FeedbackError::InputClosed)
        }

        fn guess_feedback(&mut self, _: &Matching) -> Result<usize, FeedbackError> {
            self.guesses.pop_front().ok_or(FeedbackError::InputClosed)
        }
    }

    #[test]
    fn solves_canonical_scenario() {
        let digits = Alphabet::digits();
        let answer = digits.parse("9352741680").unwrap();
        let mut rng = rng_from_seed(Some(7));
        let pool = random_pool(&digits, 200, &mut rng);
        let config = GameConfig::canonical()
            .with_thresholds(10_000, 20)
            .with_large_pool(pool);

        let report = Game::new(&config)
            .unwrap()
            .run(&mut HiddenAnswer::new(answer))
            .unwrap();

        assert_eq!(report.outcome, GameOutcome::Solved(answer));
        assert!(report.round_count() >= 1);

        let first = &report.rounds[0];
        assert_eq!(first.probe, Probe::new(0, 0));
        assert!(!first.probe_matched);
        assert_eq!(first.after_probe, 3_628_800 - 362_880);
        let opening = first.guess.as_ref().unwrap();
        assert_eq!(opening.guess.to_string(), "0123456789");
        assert_eq!(opening.origin, GuessOrigin::Opening(0));
        assert_eq!(opening.correct, 1);
    }

    #[test]
    fn step_by_step_states() {
        let alphabet = Alphabet::new("0123").unwrap();
        let config = GameConfig::for_alphabet(alphabet.clone());
        let mut game = Game::new(&config).unwrap();
        let mut source = HiddenAnswer::new(alphabet.parse("0123").unwrap());

        assert_eq!(game.state(), &GameState::Start);
        assert_eq!(game.advance(&mut source).unwrap(), &GameState::ProbeStage);
        assert_eq!(
            game.advance(&mut source).unwrap(),
            &GameState::FilterAfterProbe {
                probe: Probe::new(0, 0),
                matched: true
            }
        );
        assert_eq!(game.advance(&mut source).unwrap(), &GameState::GuessStage);
        assert_eq!(game.candidates().len(), 6);

        let state = game.advance(&mut source).unwrap().clone();
        assert_eq!(
            state,
            GameState::FilterAfterGuess {
                guess: alphabet.identity(),
                correct: 4
            }
        );
        assert_eq!(
            game.advance(&mut source).unwrap(),
            &GameState::Solved(alphabet.identity())
        );
        assert_eq!(game.candidates().len(), 1);

        // Terminal states stay put
        assert_eq!(
            game.advance(&mut source).unwrap(),
            &GameState::Solved(alphabet.identity())
        );
        assert_eq!(game.rounds().len(), 1);
    }

    #[test]
    fn every_small_answer_is_solved() {
        let alphabet = Alphabet::new("012345").unwrap();
        let config = GameConfig::for_alphabet(alphabet.clone());

        let mut worst = 0;
        for answer in alphabet.permutations() {
            let report = Game::new(&config)
                .unwrap()
                .run(&mut HiddenAnswer::new(answer))
                .unwrap();
            assert_eq!(report.outcome, GameOutcome::Solved(answer));
            worst = worst.max(report.round_count());
        }
        assert!(worst <= alphabet.len(), "worst case took {worst} rounds");
    }

    #[test]
    fn searched_probes_and_guesses_are_never_repeated() {
        let alphabet = Alphabet::new("01234").unwrap();
        let config = GameConfig::for_alphabet(alphabet.clone()).with_thresholds(60, 10);
        let answer = alphabet.parse("31402").unwrap();
        let mut game = Game::new(&config).unwrap();
        let mut source = HiddenAnswer::new(answer);

        while !game.state().is_terminal() {
            game.advance(&mut source).unwrap();
        }

        // Only the default probe may come back, once a single candidate is left
        let mut probes: Vec<Probe> = game
            .probes()
            .iter()
            .copied()
            .filter(|&probe| probe != default_probe())
            .collect();
        let searched = probes.len();
        probes.sort_unstable();
        probes.dedup();
        assert_eq!(probes.len(), searched);

        let mut guesses: Vec<Matching> = game.guesses().iter().copied().collect();
        guesses.sort_unstable();
        guesses.dedup();
        assert_eq!(guesses.len(), game.guesses().len());
        assert_eq!(game.guesses().last(), Some(&answer));
    }

    #[test]
    fn candidates_shrink_round_over_round() {
        let alphabet = Alphabet::new("012345").unwrap();
        let config = GameConfig::for_alphabet(alphabet.clone());
        let report = Game::new(&config)
            .unwrap()
            .run(&mut HiddenAnswer::new(alphabet.parse("504132").unwrap()))
            .unwrap();

        let mut last = 720;
        for round in &report.rounds {
            assert!(round.after_probe <= last);
            let guess = round.guess.as_ref().unwrap();
            assert!(guess.remaining <= round.after_probe);
            last = guess.remaining;
        }
        assert_eq!(last, 1);
    }

    #[test]
    fn contradictory_feedback_is_impossible() {
        let alphabet = Alphabet::new("012").unwrap();
        let config = GameConfig::for_alphabet(alphabet);
        // "0 is first" then "012 shares nothing" cannot both hold.
        let mut source = Scripted::new(&[true], &[0]);

        let report = Game::new(&config).unwrap().run(&mut source).unwrap();
        assert_eq!(report.outcome, GameOutcome::Impossible);
        assert_eq!(report.round_count(), 1);
        assert_eq!(report.rounds[0].guess.as_ref().unwrap().remaining, 0);
    }

    #[test]
    fn impossible_after_probe_has_no_guess() {
        let alphabet = Alphabet::new("0123").unwrap();
        let config = GameConfig::for_alphabet(alphabet.clone());
        let candidates = CandidateSet::from(vec![alphabet.identity()]);
        // The only candidate starts with 0
        let mut source = Scripted::new(&[false], &[]);

        let report = Game::with_candidates(&config, candidates)
            .unwrap()
            .run(&mut source)
            .unwrap();
        assert_eq!(report.outcome, GameOutcome::Impossible);
        assert_eq!(report.round_count(), 1);
        assert_eq!(report.rounds[0].after_probe, 0);
        assert_eq!(report.rounds[0].guess, None);
    }

    #[test]
    fn feedback_above_size_is_rejected() {
        let alphabet = Alphabet::new("012").unwrap();
        let config = GameConfig::for_alphabet(alphabet);
        let mut game = Game::new(&config).unwrap();
        let mut source = Scripted::new(&[true], &[4]);

        for _ in 0..3 {
            game.advance(&mut source).unwrap();
        }
        assert_eq!(game.state(), &GameState::GuessStage);
        assert!(matches!(
            game.advance(&mut source),
            Err(GameError::FeedbackOutOfRange { value: 4, max: 3 })
        ));
        assert_eq!(game.state(), &GameState::GuessStage);
        assert!(game.guesses().is_empty());
    }

    #[test]
    fn source_failure_propagates() {
        let alphabet = Alphabet::new("012").unwrap();
        let config = GameConfig::for_alphabet(alphabet);
        let mut source = Scripted::new(&[], &[]);

        assert!(matches!(
            Game::new(&config).unwrap().run(&mut source),
            Err(GameError::Feedback(FeedbackError::InputClosed))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig::canonical().with_workers(0);
        assert!(matches!(
            Game::new(&config),
            Err(GameError::Config(ConfigError::NoWorkers))
        ));
    }

    #[test]
    fn game_over_pool_candidates() {
        let alphabet = Alphabet::new("0123").unwrap();
        let config = GameConfig::for_alphabet(alphabet.clone());
        let answer = alphabet.parse("2013").unwrap();
        let candidates = CandidateSet::from(vec![
            alphabet.parse("1032").unwrap(),
            answer,
            alphabet.parse("3210").unwrap(),
        ]);

        let report = Game::with_candidates(&config, candidates)
            .unwrap()
            .run(&mut HiddenAnswer::new(answer))
            .unwrap();
        assert_eq!(report.outcome, GameOutcome::Solved(answer));
    }

    #[test]
    fn lone_survivor_round_asks_default() {
        let alphabet = Alphabet::new("0123").unwrap();
        let config = GameConfig::for_alphabet(alphabet.clone());
        let answer = alphabet.parse("2013").unwrap();
        let candidates = CandidateSet::from(vec![
            alphabet.parse("1032").unwrap(),
            answer,
            alphabet.parse("3210").unwrap(),
        ]);

        // The opening guess 0123 shares one position with 2013 only
        let report = Game::with_candidates(&config, candidates)
            .unwrap()
            .run(&mut HiddenAnswer::new(answer))
            .unwrap();
        assert_eq!(report.round_count(), 2);
        assert_eq!(report.rounds[0].after_probe, 3);
        assert_eq!(report.rounds[1].probe, default_probe());
        assert_eq!(
            report.rounds[1].guess.as_ref().map(|record| record.origin),
            Some(GuessOrigin::SoleCandidate)
        );
        assert_eq!(report.outcome, GameOutcome::Solved(answer));
    }
}
