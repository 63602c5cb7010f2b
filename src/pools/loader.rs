//! Pool loading utilities
//!
//! Reads matchings written one per line, e.g. `4579108623`.

use super::PermutationSource;
use crate::core::{Alphabet, Matching, MatchingError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for pool ingestion
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Failed to read pool {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: MatchingError,
    },
    #[error("Entry {line}: expected {expected} symbols, got {actual}")]
    WrongLength {
        line: usize,
        expected: usize,
        actual: usize,
    },
}

/// Pool stored in a file
#[derive(Debug, Clone)]
pub struct FilePool {
    path: PathBuf,
}

impl FilePool {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PermutationSource for FilePool {
    fn read_permutations(&mut self, alphabet: &Alphabet) -> Result<Vec<Matching>, PoolError> {
        let label = self.path.display().to_string();
        let file = File::open(&self.path).map_err(|source| PoolError::Io {
            path: label.clone(),
            source,
        })?;
        parse_lines(BufReader::new(file), alphabet, &label)
    }
}

/// Pool read from any buffered stream (stdin, in-memory bytes, …)
pub struct ReaderPool<R> {
    reader: R,
    label: String,
}

impl<R: BufRead> ReaderPool<R> {
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            reader,
            label: label.into(),
        }
    }
}

impl<R: BufRead> PermutationSource for ReaderPool<R> {
    fn read_permutations(&mut self, alphabet: &Alphabet) -> Result<Vec<Matching>, PoolError> {
        parse_lines(&mut self.reader, alphabet, &self.label)
    }
}

/// Parse one matching per line, skipping blank lines
fn parse_lines<R: BufRead>(
    reader: R,
    alphabet: &Alphabet,
    label: &str,
) -> Result<Vec<Matching>, PoolError> {
    let mut matchings = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| PoolError::Io {
            path: label.to_string(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let matching = alphabet
            .parse(trimmed)
            .map_err(|source| PoolError::Malformed {
                line: index + 1,
                source,
            })?;
        matchings.push(matching);
    }

    Ok(matchings)
}
