//! Matching Minimax
//!
//! Finds a hidden permutation of N symbols by alternating yes/no probes of a
//! single position with full-matching guesses scored by how many positions
//! they get right. Guesses are picked by a parallel minimax search that
//! minimizes the worst-case number of surviving candidates.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use matching_minimax::core::Alphabet;
//! use matching_minimax::solver::{Game, GameConfig, HiddenAnswer};
//!
//! let config = GameConfig::canonical();
//! let answer = Alphabet::digits().parse("9352741680").unwrap();
//!
//! let report = Game::new(&config)
//!     .unwrap()
//!     .run(&mut HiddenAnswer::new(answer))
//!     .unwrap();
//! println!("Solved in {} rounds", report.round_count());
//! ```

// Core domain types
pub mod core;

// Solving algorithms
pub mod solver;

// Permutation pools
pub mod pools;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
