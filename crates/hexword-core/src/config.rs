//! Game configuration and configuration errors.

use crate::hex::HexCoord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported board radius (127 tiles, fits the 128-bit search mask)
pub const MAX_RADIUS: u32 = 6;

/// Errors raised when the game is set up with unusable inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Seed word list is empty")]
    EmptySeedWords,

    #[error("Seed word {0:?} must be non-empty and alphabetic")]
    InvalidSeedWord(String),

    #[error("Letter pool is empty")]
    EmptyLetterPool,

    #[error("Letter pool entry {0:?} is not an ASCII letter")]
    InvalidPoolLetter(char),

    #[error("Dictionary is empty")]
    EmptyDictionary,

    #[error("Board radius {0} is outside 1..={max}", max = MAX_RADIUS)]
    RadiusOutOfRange(u32),

    #[error("Invalid word length limits: min {min}, max {max}")]
    InvalidWordLengths { min: usize, max: usize },

    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),

    #[error("Board is missing a letter at {0}")]
    IncompleteBoard(HexCoord),

    #[error("Tile at {0} is duplicated or outside the board")]
    UnexpectedTile(HexCoord),

    #[error("Board rows: expected {expected}, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("Board row {row} has {found} letters, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid config JSON: {0}")]
    Json(String),
}

/// Tunable rules of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board radius (4 gives 61 tiles)
    pub radius: u32,
    /// Shortest word a player may submit or the search may report
    pub min_word_length: usize,
    /// Longest word the board-wide search will build
    pub max_search_length: usize,
    /// Accepted submissions before the game ends
    pub submissions_per_game: usize,
    /// Entries kept on the leaderboard
    pub leaderboard_size: usize,
    /// Board-wide findings shown in the summary
    pub summary_size: usize,
    /// Report each word once in the summary instead of once per path
    pub dedupe_findings: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            radius: 4,
            min_word_length: 4,
            max_search_length: 10,
            submissions_per_game: 10,
            leaderboard_size: 10,
            summary_size: 10,
            dedupe_findings: true,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every limit is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_RADIUS).contains(&self.radius) {
            return Err(ConfigError::RadiusOutOfRange(self.radius));
        }
        if self.min_word_length == 0 || self.max_search_length < self.min_word_length {
            return Err(ConfigError::InvalidWordLengths {
                min: self.min_word_length,
                max: self.max_search_length,
            });
        }
        if self.submissions_per_game == 0 {
            return Err(ConfigError::ZeroLimit("submissions_per_game"));
        }
        if self.leaderboard_size == 0 {
            return Err(ConfigError::ZeroLimit("leaderboard_size"));
        }
        if self.summary_size == 0 {
            return Err(ConfigError::ZeroLimit("summary_size"));
        }
        Ok(())
    }
}
