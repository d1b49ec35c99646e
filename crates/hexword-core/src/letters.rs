//! Letter data that feeds board generation and scoring.
//!
//! - [`LetterScores`]: point value of each letter
//! - [`LetterPool`]: frequency-weighted multiset used for random fill
//! - [`SeedWords`]: words that can be embedded into a fresh board
//!
//! Each type has a `Default` carrying the data the game ships with.

use crate::config::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Score used for any character outside A-Z
const FALLBACK_POINTS: u32 = 1;

/// Point value per letter, A through Z
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterScores {
    points: [u32; 26],
}

impl LetterScores {
    /// Build a table from 26 point values in alphabetical order
    pub const fn new(points: [u32; 26]) -> Self {
        Self { points }
    }

    /// Points for a letter (case-insensitive)
    pub fn points(&self, letter: char) -> u32 {
        let upper = letter.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            self.points[(upper as u8 - b'A') as usize]
        } else {
            FALLBACK_POINTS
        }
    }

    /// Sum of the point values of every letter in `word`
    pub fn word_points(&self, word: &str) -> u32 {
        word.chars().map(|c| self.points(c)).sum()
    }
}

impl Default for LetterScores {
    fn default() -> Self {
        Self::new([
            1, 3, 3, 2, 1, // A B C D E
            4, 2, 4, 1, 8, // F G H I J
            5, 1, 3, 1, 1, // K L M N O
            3, 10, 1, 1, 1, // P Q R S T
            1, 4, 4, 8, 4, // U V W X Y
            10, // Z
        ])
    }
}

/// Frequency-weighted multiset of uppercase letters.
///
/// Common letters appear more often in the pool, so a uniform draw from it
/// follows roughly English letter frequencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterPool {
    letters: Vec<char>,
}

impl LetterPool {
    /// Create a pool from individual letters (repeats give weight)
    pub fn new(letters: impl IntoIterator<Item = char>) -> Result<Self, ConfigError> {
        let mut pool = Vec::new();
        for letter in letters {
            if !letter.is_ascii_alphabetic() {
                return Err(ConfigError::InvalidPoolLetter(letter));
            }
            pool.push(letter.to_ascii_uppercase());
        }
        if pool.is_empty() {
            return Err(ConfigError::EmptyLetterPool);
        }
        Ok(Self { letters: pool })
    }

    /// Create a pool from `(letter, count)` pairs
    pub fn from_counts(counts: &[(char, usize)]) -> Result<Self, ConfigError> {
        Self::new(
            counts
                .iter()
                .flat_map(|&(letter, count)| std::iter::repeat(letter).take(count)),
        )
    }

    /// Draw one letter uniformly from the multiset
    pub fn draw<R: Rng>(&self, rng: &mut R) -> char {
        self.letters[rng.gen_range(0..self.letters.len())]
    }

    /// Number of entries in the multiset
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false; a pool cannot be constructed empty
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// How many times `letter` occurs in the pool
    pub fn weight(&self, letter: char) -> usize {
        let upper = letter.to_ascii_uppercase();
        self.letters.iter().filter(|&&c| c == upper).count()
    }
}

impl Default for LetterPool {
    fn default() -> Self {
        const COUNTS: [(char, usize); 26] = [
            ('E', 12), ('A', 9), ('R', 6), ('I', 7), ('O', 6), ('T', 6), ('N', 6),
            ('S', 6), ('L', 4), ('C', 3), ('U', 3), ('D', 3), ('P', 3), ('M', 3),
            ('H', 3), ('G', 3), ('B', 2), ('F', 2), ('Y', 2), ('W', 2), ('K', 2),
            ('V', 2), ('X', 2), ('Z', 2), ('J', 2), ('Q', 2),
        ];
        Self {
            letters: COUNTS
                .iter()
                .flat_map(|&(letter, count)| std::iter::repeat(letter).take(count))
                .collect(),
        }
    }
}

/// Words that may be embedded into a board at generation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedWords {
    words: Vec<String>,
}

impl SeedWords {
    /// Create a seed list; every word must be alphabetic. Stored lowercase.
    pub fn new<I, S>(words: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::InvalidSeedWord(word.to_string()));
            }
            list.push(word.to_ascii_lowercase());
        }
        if list.is_empty() {
            return Err(ConfigError::EmptySeedWords);
        }
        Ok(Self { words: list })
    }

    /// Pick one word uniformly at random
    pub fn choose<R: Rng>(&self, rng: &mut R) -> &str {
        &self.words[rng.gen_range(0..self.words.len())]
    }

    /// All seed words
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Default for SeedWords {
    fn default() -> Self {
        const WORDS: [&str; 40] = [
            "construction", "demonstration", "contributions", "administering",
            "information", "presentations", "interpretation", "manipulation",
            "registration", "interception", "desirability", "admirability",
            "embarrassment", "understatement", "acknowledgement", "personification",
            "encouragement", "establishments", "explanation", "organization",
            "straightening", "choreographers", "thankfulness", "faithfulness",
            "heartbreaker", "skateboarder", "shapeshifter", "sharpshooter",
            "unemployment", "transforming", "psychologists", "physiologist",
            "departments", "confidence", "conferences", "preferences",
            "grandfathers", "grandmothers", "grandparents", "grandchild",
        ];
        Self {
            words: WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}
