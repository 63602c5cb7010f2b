//! Core domain types for permutation guessing
//!
//! This module contains the fundamental value types with no solver logic.
//! All types here are pure, testable, and cheap to copy.

mod alphabet;
mod matching;
mod permutations;
mod probe;

pub use alphabet::{Alphabet, AlphabetError};
pub use matching::{MAX_SYMBOLS, Matching, MatchingError};
pub use permutations::Permutations;
pub use probe::Probe;
