//! Batch runs
//!
//! Plays one game per hidden answer (every permutation, or the answers read
//! from a pool file) and aggregates round counts.

use super::play::play_from;
use crate::core::Matching;
use crate::solver::{CandidateSet, GameConfig, GameError, GameOutcome, GameReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::info;

/// Aggregate results of a batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStatistics {
    pub games: usize,
    pub solved: usize,
    pub impossible: usize,
    /// Rounds summed over solved games
    pub total_rounds: usize,
    pub min_rounds: Option<usize>,
    pub max_rounds: usize,
    /// Solved games by round count
    pub distribution: BTreeMap<usize, usize>,
    /// First answer that needed `max_rounds`
    pub worst_answer: Option<(Matching, usize)>,
    pub elapsed: Duration,
}

impl BatchStatistics {
    /// Fold one finished game into the totals
    pub fn record(&mut self, answer: Matching, report: &GameReport) {
        self.games += 1;
        match report.outcome {
            GameOutcome::Solved(_) => {
                let rounds = report.round_count();
                self.solved += 1;
                self.total_rounds += rounds;
                self.min_rounds = Some(self.min_rounds.map_or(rounds, |min| min.min(rounds)));
                *self.distribution.entry(rounds).or_insert(0) += 1;
                if self.worst_answer.is_none_or(|(_, worst)| rounds > worst) {
                    self.max_rounds = rounds;
                    self.worst_answer = Some((answer, rounds));
                }
            }
            GameOutcome::Impossible => self.impossible += 1,
        }
    }

    /// Average rounds per solved game
    #[must_use]
    pub fn average_rounds(&self) -> f64 {
        if self.solved == 0 {
            0.0
        } else {
            self.total_rounds as f64 / self.solved as f64
        }
    }
}

/// Play one game per answer
///
/// The full candidate universe is enumerated once and cloned for each game.
///
/// # Errors
/// Returns the first `GameError` raised by any game.
pub fn run_batch(
    config: &GameConfig,
    answers: &[Matching],
    show_progress: bool,
) -> Result<BatchStatistics, GameError> {
    let start = CandidateSet::full(&config.alphabet)?;
    run_batch_from(config, &start, answers, show_progress)
}

/// Play one game per answer from a prepared starting set
///
/// # Errors
/// Returns the first `GameError` raised by any game.
pub fn run_batch_from(
    config: &GameConfig,
    start: &CandidateSet,
    answers: &[Matching],
    show_progress: bool,
) -> Result<BatchStatistics, GameError> {
    let pb = if show_progress {
        ProgressBar::new(answers.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let mut stats = BatchStatistics::default();
    let timer = Instant::now();

    for (idx, &answer) in answers.iter().enumerate() {
        let report = play_from(config, start, answer)?;
        stats.record(answer, &report);

        if idx % 10 == 0 {
            pb.set_message(format!("Avg: {:.3}", stats.average_rounds()));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");
    stats.elapsed = timer.elapsed();

    info!(
        games = stats.games,
        solved = stats.solved,
        average = stats.average_rounds(),
        "batch finished"
    );
    Ok(stats)
}
