//! Hexword - a word-finding puzzle on a hexagonal letter grid
//!
//! This crate provides the core game logic for Hexword, including:
//! - Hex coordinate system and adjacency for the letter grid
//! - Seeded board generation from a seed word and frequency-weighted letters
//! - Path validation against the dictionary
//! - Exhaustive board-wide word search
//! - Game session state with scoring and an end-of-game summary
//!
//! # Architecture
//!
//! The game engine is designed to be platform-agnostic. It can be compiled to:
//! - Native Rust for server-side game hosting
//! - WebAssembly for client-side single-player games
//!
//! # Modules
//!
//! - [`hex`]: Axial coordinates and adjacency
//! - [`letters`]: Point table, letter pool, seed words
//! - [`dictionary`]: Word lists and the [`Lexicon`] trait
//! - [`board`]: Tiles and seeded board generation
//! - [`path`]: Path and word validation
//! - [`search`]: Board-wide word search
//! - [`scoring`]: Leaderboard and summary
//! - [`game`]: Game session state machine

pub mod actions;
pub mod board;
pub mod config;
pub mod dictionary;
pub mod game;
pub mod hex;
pub mod letters;
pub mod path;
pub mod scoring;
pub mod search;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use board::{Board, BoardGenerator, BoardJson, SeedPlacement, Tile};
pub use config::{ConfigError, GameConfig};
pub use dictionary::{Dictionary, Lexicon};
pub use game::{GameError, GamePhase, GameSession, GameSnapshot};
pub use hex::{are_neighbors, hexes_within, HexCoord};
pub use letters::{LetterPool, LetterScores, SeedWords};
pub use path::{validate_path, PathVerdict, Rejection};
pub use scoring::{GameSummary, Leaderboard, ScoredWord};
pub use search::WordSearch;
