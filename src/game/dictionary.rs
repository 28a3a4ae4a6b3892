//! Lexicon loading
//!
//! Reads a word list (one token per line) into a de-duplicated set of
//! lowercase words. Ordering is stable so seeded games are reproducible.

use crate::error::GameError;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// The set of words a board can be built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: BTreeSet<String>,
}

impl Lexicon {
    /// Read a lexicon from a UTF-8 text file.
    ///
    /// Blank lines are skipped, tokens are trimmed and lowercased.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GameError::Lexicon {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::parse(&text);
        log::info!("loaded {} words from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Build a lexicon from already-loaded text.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Check if a word is in the lexicon (case-insensitive).
    #[cfg(test)]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
