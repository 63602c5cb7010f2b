//! Formatting utilities for terminal output

use crate::core::{Alphabet, Matching};
use crate::solver::{GuessOrigin, Round};

/// Format a matching as a tuple of its symbols, e.g. `(9, 3, 5)`
#[must_use]
pub fn matching_tuple(alphabet: &Alphabet, matching: &Matching) -> String {
    let symbols: Vec<String> = matching
        .ranks()
        .iter()
        .map(|&rank| alphabet.symbol(rank).to_string())
        .collect();
    format!("({})", symbols.join(", "))
}

/// Format one summary line: `[Round n] (position, symbol), (s0, s1, …).`
///
/// Round numbers are right-aligned to `width` digits. A round whose probe
/// emptied the candidate set has no guess part.
#[must_use]
pub fn round_line(alphabet: &Alphabet, round: &Round, width: usize) -> String {
    let probe = alphabet.render_probe(&round.probe);
    match &round.guess {
        Some(record) => format!(
            "[Round {:>width$}] {probe}, {}.",
            round.number,
            matching_tuple(alphabet, &record.guess)
        ),
        None => format!("[Round {:>width$}] {probe}.", round.number),
    }
}

/// Short label for how a guess was chosen
#[must_use]
pub fn origin_label(origin: &GuessOrigin) -> String {
    match origin {
        GuessOrigin::SoleCandidate => "sole candidate".to_string(),
        GuessOrigin::Opening(index) => format!("opening #{}", index + 1),
        GuessOrigin::Minimax {
            tier,
            worst_case,
            timed_out,
        } => {
            let cut = if *timed_out { ", deadline hit" } else { "" };
            format!("minimax over {tier}, worst case {worst_case}{cut}")
        }
        GuessOrigin::Fallback => "fallback".to_string(),
    }
}

/// Number of decimal digits needed to print `n`
#[must_use]
pub const fn digit_width(n: usize) -> usize {
    let mut width = 1;
    let mut rest = n / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value * width / max).min(width)
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
