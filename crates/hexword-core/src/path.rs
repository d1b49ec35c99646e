//! Checking a traced path of tiles before it is scored.
//!
//! A path is valid when it names only board tiles, never repeats one, each consecutive
//! pair is adjacent, it has enough letters, and its word is in the dictionary. The
//! structural checks run first, so a disconnected path is reported as such even when
//! it happens to spell a real word.

use crate::board::Board;
use crate::dictionary::Lexicon;
use crate::hex::{are_neighbors, HexCoord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Why a path was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("No tile at {coord}")]
    UnknownTile { coord: HexCoord },

    #[error("Tile at {coord} is used twice")]
    RepeatedTile { coord: HexCoord },

    #[error("Tiles are not all connected (break before tile {index})")]
    NotAdjacent { index: usize },

    #[error("Word must be at least {minimum} letters (got {length})")]
    TooShort { length: usize, minimum: usize },

    #[error("\"{word}\" is not in the word list")]
    NotInDictionary { word: String },
}

/// Outcome of validating a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathVerdict {
    /// The path spells an accepted word
    Valid { word: String, score: u32 },
    /// The path was refused
    Rejected(Rejection),
}

impl PathVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, PathVerdict::Valid { .. })
    }

    /// The score of a valid path
    pub fn score(&self) -> Option<u32> {
        match self {
            PathVerdict::Valid { score, .. } => Some(*score),
            PathVerdict::Rejected(_) => None,
        }
    }
}

/// Index of the first tile that is not adjacent to the one before it
pub fn first_break(path: &[HexCoord]) -> Option<usize> {
    path.windows(2)
        .position(|pair| !are_neighbors(&pair[0], &pair[1]))
        .map(|i| i + 1)
}

/// Whether every consecutive pair is adjacent. Empty and single-tile paths are connected.
pub fn is_connected(path: &[HexCoord]) -> bool {
    first_break(path).is_none()
}

/// Lowercase word spelled by a path, or `None` if a coordinate is off the board
pub fn path_word(board: &Board, path: &[HexCoord]) -> Option<String> {
    path.iter()
        .map(|c| board.tile(c).map(|t| t.letter.to_ascii_lowercase()))
        .collect()
}

/// Sum of the point values along a path, or `None` if a coordinate is off the board
pub fn path_score(board: &Board, path: &[HexCoord]) -> Option<u32> {
    path.iter().map(|c| board.tile(c).map(|t| t.points)).sum()
}

/// Run every structural and lexical check on a path
pub fn validate_path<L: Lexicon + ?Sized>(
    board: &Board,
    path: &[HexCoord],
    lexicon: &L,
    min_length: usize,
) -> PathVerdict {
    match check_path(board, path, lexicon, min_length) {
        Ok((word, score)) => PathVerdict::Valid { word, score },
        Err(rejection) => PathVerdict::Rejected(rejection),
    }
}

fn check_path<L: Lexicon + ?Sized>(
    board: &Board,
    path: &[HexCoord],
    lexicon: &L,
    min_length: usize,
) -> Result<(String, u32), Rejection> {
    let mut seen = HashSet::with_capacity(path.len());
    let mut word = String::with_capacity(path.len());
    let mut score = 0;

    for coord in path {
        let tile = board
            .tile(coord)
            .ok_or(Rejection::UnknownTile { coord: *coord })?;
        if !seen.insert(*coord) {
            return Err(Rejection::RepeatedTile { coord: *coord });
        }
        word.push(tile.letter.to_ascii_lowercase());
        score += tile.points;
    }

    if let Some(index) = first_break(path) {
        return Err(Rejection::NotAdjacent { index });
    }
    if path.len() < min_length {
        return Err(Rejection::TooShort {
            length: path.len(),
            minimum: min_length,
        });
    }
    if !lexicon.contains(&word) {
        return Err(Rejection::NotInDictionary { word });
    }

    Ok((word, score))
}
