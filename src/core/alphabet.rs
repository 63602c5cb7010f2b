//! Alphabet of symbols a matching permutes
//!
//! The alphabet is the only place that knows what the ranks stored in a
//! [`Matching`] stand for. Parsing user or file input and rendering matchings
//! for display both go through it.

use super::matching::{MAX_SYMBOLS, Matching, MatchingError};
use super::permutations::Permutations;
use super::probe::Probe;
use std::fmt;
use thiserror::Error;

/// Ordered set of distinct symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

/// Error type for invalid alphabets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    #[error("Alphabet must contain at least one symbol")]
    Empty,
    #[error("Alphabet may contain at most 16 symbols, got {0}")]
    TooLong(usize),
    #[error("Alphabet symbol '{0}' appears more than once")]
    Duplicate(char),
}

impl Alphabet {
    /// Create an alphabet from a string of distinct symbols
    ///
    /// # Errors
    /// Returns `AlphabetError` if the string is empty, longer than [`MAX_SYMBOLS`],
    /// or repeats a symbol.
    pub fn new(symbols: &str) -> Result<Self, AlphabetError> {
        let symbols: Vec<char> = symbols.chars().collect();

        if symbols.is_empty() {
            return Err(AlphabetError::Empty);
        }
        if symbols.len() > MAX_SYMBOLS {
            return Err(AlphabetError::TooLong(symbols.len()));
        }
        for (i, &symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(&symbol) {
                return Err(AlphabetError::Duplicate(symbol));
            }
        }

        Ok(Self { symbols })
    }

    /// The canonical ten-digit alphabet `0123456789`
    #[must_use]
    pub fn digits() -> Self {
        Self {
            symbols: ('0'..='9').collect(),
        }
    }

    /// Number of symbols (N)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol with the given rank
    ///
    /// # Panics
    /// Panics if `rank >= self.len()`
    #[inline]
    #[must_use]
    pub fn symbol(&self, rank: u8) -> char {
        self.symbols[usize::from(rank)]
    }

    /// Rank of `symbol`, if it belongs to the alphabet
    #[must_use]
    pub fn rank_of(&self, symbol: char) -> Option<u8> {
        self.symbols
            .iter()
            .position(|&s| s == symbol)
            .map(|i| i as u8)
    }

    /// All symbols in rank order
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Parse a matching written as one symbol per position
    ///
    /// # Errors
    /// Returns `MatchingError` if the length differs from the alphabet size, a
    /// symbol is not in the alphabet, or a symbol repeats.
    ///
    /// # Examples
    /// ```
    /// use matching_minimax::core::Alphabet;
    ///
    /// let digits = Alphabet::digits();
    /// let m = digits.parse("9352741680").unwrap();
    /// assert_eq!(digits.render(&m), "9352741680");
    /// assert!(digits.parse("0123").is_err());
    /// ```
    pub fn parse(&self, text: &str) -> Result<Matching, MatchingError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != self.len() {
            return Err(MatchingError::InvalidLength {
                expected: self.len(),
                actual: chars.len(),
            });
        }

        let mut ranks = Vec::with_capacity(chars.len());
        let mut seen = [false; MAX_SYMBOLS];
        for ch in chars {
            let rank = self.rank_of(ch).ok_or(MatchingError::UnknownSymbol(ch))?;
            if std::mem::replace(&mut seen[usize::from(rank)], true) {
                return Err(MatchingError::RepeatedSymbol(ch));
            }
            ranks.push(rank);
        }

        Ok(Matching::from_ranks_unchecked(&ranks))
    }

    /// Parse a probe given as a position and a symbol
    ///
    /// # Errors
    /// Returns `MatchingError` if the position is outside the alphabet size or
    /// the symbol is unknown.
    pub fn probe(&self, position: usize, symbol: char) -> Result<Probe, MatchingError> {
        if position >= self.len() {
            return Err(MatchingError::RankOutOfRange {
                rank: position as u8,
                len: self.len(),
            });
        }
        let rank = self
            .rank_of(symbol)
            .ok_or(MatchingError::UnknownSymbol(symbol))?;
        Ok(Probe::new(position as u8, rank))
    }

    /// Render a matching with this alphabet's symbols
    #[must_use]
    pub fn render(&self, matching: &Matching) -> String {
        matching.ranks().iter().map(|&r| self.symbol(r)).collect()
    }

    /// Render a probe as `(position, symbol)`
    #[must_use]
    pub fn render_probe(&self, probe: &Probe) -> String {
        format!("({}, {})", probe.position(), self.symbol(probe.symbol()))
    }

    /// The identity matching (symbols in alphabet order)
    #[must_use]
    pub fn identity(&self) -> Matching {
        Matching::identity(self.len())
    }

    /// Every permutation of the alphabet in lexicographic order
    #[must_use]
    pub fn permutations(&self) -> Permutations {
        Permutations::new(self.len())
    }

    /// The permutations whose first symbol has rank `first`, in lexicographic order
    #[must_use]
    pub fn permutations_starting_with(&self, first: u8) -> Permutations {
        Permutations::starting_with(self.len(), first)
    }

    /// Number of permutations (N!), or `None` on overflow
    #[must_use]
    pub fn permutation_count(&self) -> Option<usize> {
        (1..=self.len()).try_fold(1usize, usize::checked_mul)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::digits()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
