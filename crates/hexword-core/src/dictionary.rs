//! Word lists used to validate submissions and drive the board-wide search.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::ops::Bound;

/// Membership queries over a set of lowercase words
pub trait Lexicon {
    /// Whether `word` is a valid word
    fn contains(&self, word: &str) -> bool;

    /// Whether some valid word starts with `prefix`.
    ///
    /// The default answer is always `true`, which disables pruning.
    fn has_prefix(&self, _prefix: &str) -> bool {
        true
    }
}

/// An ordered set of lowercase words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    words: BTreeSet<String>,
}

impl Dictionary {
    /// Build a dictionary from words; entries are trimmed and lowercased
    pub fn from_words<I, S>(words: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: BTreeSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Err(ConfigError::EmptyDictionary);
        }
        Ok(Self { words })
    }

    /// Parse a word list with one word per line; blank lines and `#` comments are skipped
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; a dictionary cannot be constructed empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate words in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl Lexicon for Dictionary {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    fn has_prefix(&self, prefix: &str) -> bool {
        self.words
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .next()
            .is_some_and(|w| w.starts_with(prefix))
    }
}

impl Lexicon for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, word)
    }
}
