//! Feedback sources
//!
//! The game loop never knows the hidden matching itself; it asks a
//! [`FeedbackSource`] to answer each probe and guess.

use crate::core::{Matching, Probe};
use std::io;
use thiserror::Error;

/// Error type for feedback sources
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Failed to read feedback: {0}")]
    Io(#[from] io::Error),
    #[error("Feedback input closed before the game finished")]
    InputClosed,
    #[error("Game aborted")]
    Aborted,
}

/// Answers probes and guesses about a hidden matching
pub trait FeedbackSource {
    /// Does the hidden matching put `probe.symbol()` at `probe.position()`?
    ///
    /// # Errors
    /// Returns `FeedbackError` if no answer can be obtained.
    fn probe_feedback(&mut self, probe: Probe) -> Result<bool, FeedbackError>;

    /// How many positions does `guess` share with the hidden matching?
    ///
    /// # Errors
    /// Returns `FeedbackError` if no answer can be obtained.
    fn guess_feedback(&mut self, guess: &Matching) -> Result<usize, FeedbackError>;

    /// True when answers are computed from a real matching and cannot
    /// contradict each other
    fn is_truthful(&self) -> bool {
        false
    }
}

/// Automated source that knows the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiddenAnswer {
    answer: Matching,
}

impl HiddenAnswer {
    #[must_use]
    pub const fn new(answer: Matching) -> Self {
        Self { answer }
    }

    #[must_use]
    pub const fn answer(&self) -> &Matching {
        &self.answer
    }
}

impl FeedbackSource for HiddenAnswer {
    fn probe_feedback(&mut self, probe: Probe) -> Result<bool, FeedbackError> {
        Ok(probe.is_contained_in(&self.answer))
    }

    fn guess_feedback(&mut self, guess: &Matching) -> Result<usize, FeedbackError> {
        Ok(guess.agreement_count(&self.answer))
    }

    fn is_truthful(&self) -> bool {
        true
    }
}
