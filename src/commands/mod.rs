//! Command implementations

pub mod batch;
pub mod generate;
pub mod interactive;
pub mod play;

pub use batch::{BatchStatistics, run_batch, run_batch_from};
pub use generate::{generate_pool, write_pool};
pub use interactive::{ConsoleOracle, run_interactive};
pub use play::{choose_answer, play_from, play_game, starting_candidates};
