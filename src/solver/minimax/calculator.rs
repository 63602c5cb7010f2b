//! Minimax worst-case calculation for full-matching guesses
//!
//! Given a guess and the possible answers, computes how many answers could
//! remain after the least helpful truthful feedback.

use crate::core::{MAX_SYMBOLS, Matching};

/// Count answers by the agreement count they would report for `guess`
///
/// Index `k` holds the number of answers sharing exactly `k` positions with
/// the guess; the vector has `guess.len() + 1` buckets.
#[must_use]
pub fn feedback_histogram(guess: &Matching, answers: &[Matching]) -> Vec<usize> {
    buckets(guess, answers)[..=guess.len()].to_vec()
}

/// Calculate the maximum remaining answers for a guess
///
/// Returns the worst-case number of answers left after this guess, or 0 when
/// there are no answers.
///
/// # Examples
/// ```
/// use matching_minimax::core::Alphabet;
/// use matching_minimax::solver::minimax::worst_case_score;
///
/// let alphabet = Alphabet::new("012").unwrap();
/// let guess = alphabet.parse("012").unwrap();
/// let answers = vec![
///     alphabet.parse("012").unwrap(), // 3 in common
///     alphabet.parse("021").unwrap(), // 1 in common
///     alphabet.parse("102").unwrap(), // 1 in common
/// ];
///
/// assert_eq!(worst_case_score(&guess, &answers), 2);
/// ```
#[inline]
#[must_use]
pub fn worst_case_score(guess: &Matching, answers: &[Matching]) -> usize {
    buckets(guess, answers).into_iter().max().unwrap_or(0)
}

/// Agreement-count tally on the stack, sized for the largest alphabet
#[inline]
fn buckets(guess: &Matching, answers: &[Matching]) -> [usize; MAX_SYMBOLS + 1] {
    let mut buckets = [0usize; MAX_SYMBOLS + 1];
    for answer in answers {
        buckets[guess.agreement_count(answer)] += 1;
    }
    buckets
}
