//! Player actions and the events they produce.

use crate::hex::HexCoord;
use crate::path::Rejection;
use crate::scoring::GameSummary;
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Add a tile to the end of the current path
    SelectTile(HexCoord),
    /// Drop the current path without submitting it
    ClearPath,
    /// Submit the current path as a word
    SubmitWord,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tile was appended to the path
    TileSelected {
        coord: HexCoord,
        /// Uppercase word spelled so far
        word: String,
    },

    /// The current path was emptied and its tiles freed
    PathCleared,

    /// A submitted word was accepted
    WordAccepted {
        word: String,
        score: u32,
        /// Accepted submissions so far, including this one
        submissions: usize,
        /// Position on the leaderboard, if it made it
        rank: Option<usize>,
    },

    /// A submitted word was refused
    WordRejected { reason: Rejection },

    /// The submission limit was reached and the board was searched
    GameFinished { summary: GameSummary },
}
