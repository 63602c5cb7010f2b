//! Minimax guess search
//!
//! Scores full-matching guesses by the largest number of answers any single
//! feedback value could leave, and searches a tiered query space for the
//! lowest score in parallel.

mod calculator;
mod engine;

pub use calculator::{feedback_histogram, worst_case_score};
pub use engine::{MinimaxEngine, QueryTier, SearchError, SearchOutcome};
