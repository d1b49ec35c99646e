//! WebSocket protocol messages for the Hexword server.

use hexword_core::{GameEvent, GameSnapshot, GameSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Start a fresh game, replacing any game this connection is playing
    NewGame,

    /// Append the tile at `(q, r)` to the current path
    SelectTile { q: i32, r: i32 },

    /// Drop the current path
    ClearPath,

    /// Submit the current path as a word
    SubmitWord,

    /// Request the full game state
    GetState,

    /// Abandon the current game
    EndGame,

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with assigned player ID
    Welcome { player_id: Uuid },

    /// A new game was created for this player
    GameStarted { game_id: Uuid, state: GameSnapshot },

    /// Outcome of a game action
    ActionResult {
        success: bool,
        events: Vec<GameEvent>,
        error: Option<String>,
    },

    /// Game state updated
    GameState { state: GameSnapshot },

    /// Submission limit reached; final results
    GameOver { summary: GameSummary },

    /// The current game was discarded
    GameEnded { game_id: Uuid },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}
