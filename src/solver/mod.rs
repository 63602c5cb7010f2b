//! Solving algorithms
//!
//! Candidate tracking, probe and guess selection, and the game loop that ties
//! them together.

pub mod candidates;
pub mod catalog;
pub mod config;
pub mod feedback;
pub mod game;
pub mod minimax;
pub mod probe_selector;

pub use candidates::{CandidateError, CandidateSet, MAX_FULL_ENUMERATION};
pub use catalog::{Catalog, GuessCatalog, ProbeCatalog};
pub use config::{ConfigError, DEFAULT_LARGE_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD, GameConfig};
pub use feedback::{FeedbackError, FeedbackSource, HiddenAnswer};
pub use game::{
    Game, GameError, GameOutcome, GameReport, GameState, GuessOrigin, GuessRecord, Round,
};
pub use minimax::{MinimaxEngine, QueryTier, SearchError, SearchOutcome};
pub use probe_selector::{default_probe, select_probe};
