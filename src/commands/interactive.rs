//! Interactive mode
//!
//! A human holds the hidden matching and answers each probe and guess on the
//! console. Their answers can contradict each other, in which case the game
//! ends as impossible.

use crate::core::{Alphabet, Matching, Probe};
use crate::output::formatters::matching_tuple;
use crate::solver::{
    CandidateSet, FeedbackError, FeedbackSource, Game, GameConfig, GameError, GameReport,
};
use std::io::{self, BufRead, Write};

/// Feedback source that prompts on a writer and reads answers from a reader
pub struct ConsoleOracle<'a, R, W> {
    alphabet: &'a Alphabet,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> ConsoleOracle<'a, R, W> {
    pub const fn new(alphabet: &'a Alphabet, input: R, output: W) -> Self {
        Self {
            alphabet,
            input,
            output,
        }
    }

    /// Prompt once and return the trimmed, lowercased reply
    fn ask(&mut self, prompt: &str) -> Result<String, FeedbackError> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(FeedbackError::InputClosed);
        }

        let reply = line.trim().to_lowercase();
        if matches!(reply.as_str(), "quit" | "q" | "exit") {
            return Err(FeedbackError::Aborted);
        }
        Ok(reply)
    }
}

impl<R: BufRead, W: Write> FeedbackSource for ConsoleOracle<'_, R, W> {
    fn probe_feedback(&mut self, probe: Probe) -> Result<bool, FeedbackError> {
        let prompt = format!(
            "Is {} a perfect match? [y/n]:",
            self.alphabet.render_probe(&probe)
        );
        loop {
            match self.ask(&prompt)?.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }

    fn guess_feedback(&mut self, guess: &Matching) -> Result<usize, FeedbackError> {
        let max = self.alphabet.len();
        let prompt = format!(
            "How many of {} are correct? [0-{max}]:",
            matching_tuple(self.alphabet, guess)
        );
        loop {
            match self.ask(&prompt)?.parse::<usize>() {
                Ok(correct) if correct <= max => return Ok(correct),
                _ => writeln!(self.output, "Please enter a number from 0 to {max}.")?,
            }
        }
    }
}

/// Run a game answered on stdin, starting from `start`
///
/// # Errors
/// Returns `GameError::Feedback` if stdin closes or the player quits.
pub fn run_interactive(config: &GameConfig, start: CandidateSet) -> Result<GameReport, GameError> {
    println!("Think of a matching of {}.", config.alphabet);
    println!("Answer each question; type 'quit' to stop.\n");

    let stdin = io::stdin();
    let mut oracle = ConsoleOracle::new(&config.alphabet, stdin.lock(), io::stdout());
    Game::with_candidates(config, start)?.run(&mut oracle)
}
