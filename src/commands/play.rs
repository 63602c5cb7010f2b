//! Single game command
//!
//! Plays one game against a known hidden matching.

use crate::core::{Alphabet, Matching};
use crate::pools::PermutationSource;
use crate::pools::generator::{random_matching, rng_from_seed};
use crate::solver::{
    CandidateError, CandidateSet, Game, GameConfig, GameError, GameReport, HiddenAnswer,
};

/// Play one game against `answer`, starting from every permutation
///
/// # Errors
/// Returns `GameError` if the configuration is invalid or a search fails.
pub fn play_game(config: &GameConfig, answer: Matching) -> Result<GameReport, GameError> {
    Game::new(config)?.run(&mut HiddenAnswer::new(answer))
}

/// Play one game starting from a prepared candidate set
///
/// Lets batch runs enumerate the universe once and clone it per game.
///
/// # Errors
/// Returns `GameError` if the configuration is invalid or a search fails.
pub fn play_from(
    config: &GameConfig,
    start: &CandidateSet,
    answer: Matching,
) -> Result<GameReport, GameError> {
    Game::with_candidates(config, start.clone())?.run(&mut HiddenAnswer::new(answer))
}

/// The set a game starts from: the entries of `source`, or every permutation
///
/// Alphabets whose N! is too large to enumerate need a source.
///
/// # Errors
/// Returns `CandidateError::TooLarge` without a source for such alphabets, or
/// `CandidateError::Pool` if the source cannot be read.
pub fn starting_candidates(
    alphabet: &Alphabet,
    source: Option<&mut dyn PermutationSource>,
) -> Result<CandidateSet, CandidateError> {
    let mut start = CandidateSet::new();
    match source {
        Some(source) => start.populate_from_pool(source, alphabet)?,
        None => start.populate_full(alphabet)?,
    }
    Ok(start)
}

/// Pick a hidden answer: the given text, or a random one
///
/// # Errors
/// Returns the parse error if `text` is not a permutation of the alphabet.
pub fn choose_answer(
    alphabet: &Alphabet,
    text: Option<&str>,
    seed: Option<u64>,
) -> Result<Matching, crate::core::MatchingError> {
    match text {
        Some(text) => alphabet.parse(text),
        None => Ok(random_matching(alphabet, &mut rng_from_seed(seed))),
    }
}
