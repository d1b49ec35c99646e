//! Game session state machine.
//!
//! A [`GameSession`] owns one board and everything a single player accumulates on
//! it: the path being traced, accepted submissions, and the leaderboard. Once the
//! configured number of words has been accepted, the board-wide search runs once
//! and the session moves to [`GamePhase::Finished`].

use crate::actions::{GameAction, GameEvent};
use crate::board::{Board, BoardGenerator};
use crate::config::{ConfigError, GameConfig};
use crate::dictionary::Dictionary;
use crate::hex::{are_neighbors, HexCoord};
use crate::path::{validate_path, PathVerdict};
use crate::scoring::{sort_by_length, top_n, GameSummary, Leaderboard, ScoredWord};
use crate::search::{distinct, WordSearch};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting tile selections and submissions
    Playing,
    /// Submission limit reached; the summary is available
    Finished,
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("No tile at {0}")]
    NoSuchTile(HexCoord),

    #[error("Tile at {0} is already in the path")]
    TileAlreadyUsed(HexCoord),

    #[error("Tiles must be adjacent: {from} and {to}")]
    NotAdjacent { from: HexCoord, to: HexCoord },

    #[error("Game is over")]
    GameOver,
}

/// One player's game on one board
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    dictionary: Arc<Dictionary>,
    phase: GamePhase,
    /// Tiles of the in-progress word, in selection order
    current_path: Vec<HexCoord>,
    /// Accepted submissions in the order they were made
    submissions: Vec<ScoredWord>,
    leaderboard: Leaderboard,
    /// Board-wide search results, one per path; filled when the game finishes
    findings: Vec<ScoredWord>,
}

impl GameSession {
    /// Start a game on a freshly generated board
    pub fn new(
        config: GameConfig,
        generator: &BoardGenerator,
        dictionary: Arc<Dictionary>,
    ) -> Result<Self, ConfigError> {
        let mut rng = rand::thread_rng();
        Self::new_with_rng(config, generator, dictionary, &mut rng)
    }

    /// Start a game on a board generated from the provided RNG
    pub fn new_with_rng<R: Rng>(
        config: GameConfig,
        generator: &BoardGenerator,
        dictionary: Arc<Dictionary>,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let board = generator.generate_with_rng(&config, rng)?;
        Self::with_board(config, board, dictionary)
    }

    /// Start a game on an existing board
    pub fn with_board(
        config: GameConfig,
        mut board: Board,
        dictionary: Arc<Dictionary>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        board.clear_used();

        let leaderboard = Leaderboard::new(config.leaderboard_size);
        Ok(Self {
            config,
            board,
            dictionary,
            phase: GamePhase::Playing,
            current_path: Vec::new(),
            submissions: Vec::new(),
            leaderboard,
            findings: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    /// Tiles selected so far
    pub fn current_path(&self) -> &[HexCoord] {
        &self.current_path
    }

    /// Uppercase letters of the current path
    pub fn current_word(&self) -> String {
        self.current_path
            .iter()
            .filter_map(|c| self.board.tile(c))
            .map(|t| t.letter)
            .collect()
    }

    /// Accepted submissions in submission order
    pub fn submissions(&self) -> &[ScoredWord] {
        &self.submissions
    }

    /// Accepted submissions, longest first
    pub fn submissions_by_length(&self) -> Vec<ScoredWord> {
        sort_by_length(&self.submissions)
    }

    /// Submissions still needed to finish the game
    pub fn submissions_remaining(&self) -> usize {
        self.config
            .submissions_per_game
            .saturating_sub(self.submissions.len())
    }

    /// Sum of every accepted submission
    pub fn total_score(&self) -> u32 {
        self.submissions.iter().map(|s| s.score).sum()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Every board-wide finding, one per path. Empty until the game finishes.
    pub fn findings(&self) -> &[ScoredWord] {
        &self.findings
    }

    /// Best board-wide findings, highest score first. Empty until the game finishes.
    pub fn top_findings(&self) -> Vec<ScoredWord> {
        if self.config.dedupe_findings {
            top_n(&distinct(&self.findings), self.config.summary_size)
        } else {
            top_n(&self.findings, self.config.summary_size)
        }
    }

    /// End-of-game summary, once the game is finished
    pub fn summary(&self) -> Option<GameSummary> {
        if !self.is_finished() {
            return None;
        }
        Some(GameSummary {
            total_score: self.total_score(),
            words_by_length: self.submissions_by_length(),
            top_findings: self.top_findings(),
            findings_count: self.findings.len(),
        })
    }

    /// Apply an action and return resulting events
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }

        match action {
            GameAction::SelectTile(coord) => self.select_tile(coord),
            GameAction::ClearPath => Ok(vec![self.clear_path()]),
            GameAction::SubmitWord => Ok(self.submit_word()),
        }
    }

    fn select_tile(&mut self, coord: HexCoord) -> Result<Vec<GameEvent>, GameError> {
        let tile = self.board.tile(&coord).ok_or(GameError::NoSuchTile(coord))?;
        if tile.used {
            return Err(GameError::TileAlreadyUsed(coord));
        }
        if let Some(&last) = self.current_path.last() {
            if !are_neighbors(&last, &coord) {
                return Err(GameError::NotAdjacent {
                    from: last,
                    to: coord,
                });
            }
        }

        self.board.set_used(&coord, true);
        self.current_path.push(coord);
        Ok(vec![GameEvent::TileSelected {
            coord,
            word: self.current_word(),
        }])
    }

    fn clear_path(&mut self) -> GameEvent {
        for coord in self.current_path.drain(..) {
            self.board.set_used(&coord, false);
        }
        GameEvent::PathCleared
    }

    /// Validate the current path, record it if accepted, and always clear it
    fn submit_word(&mut self) -> Vec<GameEvent> {
        let verdict = validate_path(
            &self.board,
            &self.current_path,
            self.dictionary.as_ref(),
            self.config.min_word_length,
        );

        let mut events = Vec::new();
        match verdict {
            PathVerdict::Valid { word, score } => {
                let entry = ScoredWord::new(word.clone(), score);
                let rank = self.leaderboard.insert(entry.clone());
                self.submissions.push(entry);
                debug!(%word, score, submissions = self.submissions.len(), "Word accepted");
                events.push(GameEvent::WordAccepted {
                    word,
                    score,
                    submissions: self.submissions.len(),
                    rank,
                });
            }
            PathVerdict::Rejected(reason) => {
                debug!(%reason, "Word rejected");
                events.push(GameEvent::WordRejected { reason });
            }
        }
        events.push(self.clear_path());

        if self.submissions.len() >= self.config.submissions_per_game {
            if let Some(summary) = self.finish() {
                events.push(GameEvent::GameFinished { summary });
            }
        }
        events
    }

    /// Run the board-wide search once and close the game
    fn finish(&mut self) -> Option<GameSummary> {
        if self.is_finished() {
            return None;
        }
        self.findings =
            WordSearch::from_config(&self.config).find_all(&self.board, self.dictionary.as_ref());
        self.phase = GamePhase::Finished;
        info!(
            total_score = self.total_score(),
            findings = self.findings.len(),
            "Game finished"
        );
        self.summary()
    }

    /// Serializable view of the session for clients
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            phase: self.phase,
            current_path: self.current_path.clone(),
            current_word: self.current_word(),
            total_score: self.total_score(),
            submissions: self.submissions.clone(),
            submissions_remaining: self.submissions_remaining(),
            leaderboard: self.leaderboard.entries().to_vec(),
            summary: self.summary(),
        }
    }
}

/// JSON-friendly view of a game in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub phase: GamePhase,
    pub current_path: Vec<HexCoord>,
    pub current_word: String,
    pub total_score: u32,
    pub submissions: Vec<ScoredWord>,
    pub submissions_remaining: usize,
    pub leaderboard: Vec<ScoredWord>,
    pub summary: Option<GameSummary>,
}
