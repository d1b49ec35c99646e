//! Per-connection game management.

use hexword_core::{
    BoardGenerator, ConfigError, Dictionary, GameAction, GameConfig, GameError, GameEvent,
    GameSession, GameSnapshot, GameSummary,
};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No active game")]
    NoActiveGame,

    #[error("Could not create game: {0}")]
    Setup(#[from] ConfigError),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// A game owned by one connected player.
pub struct PlayerGame {
    pub id: Uuid,
    pub player_id: Uuid,
    session: GameSession,
}

impl PlayerGame {
    /// Generate a fresh board and start a game on it
    pub fn new(
        id: Uuid,
        player_id: Uuid,
        config: &GameConfig,
        generator: &BoardGenerator,
        dictionary: Arc<Dictionary>,
    ) -> Result<Self, SessionError> {
        let session = GameSession::new(config.clone(), generator, dictionary)?;
        Ok(Self::from_session(id, player_id, session))
    }

    pub fn from_session(id: Uuid, player_id: Uuid, session: GameSession) -> Self {
        Self {
            id,
            player_id,
            session,
        }
    }

    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, SessionError> {
        Ok(self.session.apply_action(action)?)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.session.snapshot()
    }

    /// Final results, once the submission limit has been reached
    pub fn summary(&self) -> Option<GameSummary> {
        self.session.summary()
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexword_core::{Board, HexCoord, LetterScores};

    //    R E
    //   X A T
    //    Q Z
    fn toy_game(submissions: usize) -> PlayerGame {
        let board = Board::from_rows(1, &[" RE", "XAT", "QZ "], &LetterScores::default()).unwrap();
        let dictionary = Arc::new(Dictionary::from_words(["rate", "tear"]).unwrap());
        let config = GameConfig {
            radius: 1,
            submissions_per_game: submissions,
            ..GameConfig::default()
        };
        let session = GameSession::with_board(config, board, dictionary).unwrap();
        PlayerGame::from_session(Uuid::new_v4(), Uuid::new_v4(), session)
    }

    fn spell(game: &mut PlayerGame, path: &[(i32, i32)]) {
        for &(q, r) in path {
            game.apply_action(GameAction::SelectTile(HexCoord::new(q, r)))
                .unwrap();
        }
    }

    #[test]
    fn test_new_game_from_defaults() {
        let dictionary = Arc::new(Dictionary::from_words(["rate"]).unwrap());
        let game = PlayerGame::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            &GameConfig::default(),
            &BoardGenerator::default(),
            dictionary,
        )
        .unwrap();

        assert!(!game.is_finished());
        assert_eq!(game.snapshot().board.len(), 61);
        assert!(game.summary().is_none());
    }

    #[test]
    fn test_invalid_config_is_setup_error() {
        let dictionary = Arc::new(Dictionary::from_words(["rate"]).unwrap());
        let config = GameConfig {
            radius: 0,
            ..GameConfig::default()
        };
        let result = PlayerGame::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            &config,
            &BoardGenerator::default(),
            dictionary,
        );
        assert!(matches!(result, Err(SessionError::Setup(_))));
    }

    #[test]
    fn test_game_errors_pass_through() {
        let mut game = toy_game(1);
        let err = game
            .apply_action(GameAction::SelectTile(HexCoord::new(5, 5)))
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Game(GameError::NoSuchTile(_))
        ));
        assert_eq!(err.to_string(), "No tile at (5, 5)");
    }

    #[test]
    fn test_finishing_exposes_summary() {
        let mut game = toy_game(1);
        spell(&mut game, &[(0, -1), (0, 0), (1, 0), (1, -1)]);
        game.apply_action(GameAction::SubmitWord).unwrap();

        assert!(game.is_finished());
        let summary = game.summary().unwrap();
        assert_eq!(summary.total_score, 4);

        assert!(matches!(
            game.apply_action(GameAction::ClearPath),
            Err(SessionError::Game(GameError::GameOver))
        ));
    }
}
