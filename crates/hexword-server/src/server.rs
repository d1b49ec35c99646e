//! WebSocket server and connection handling.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::{PlayerGame, SessionError};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use hexword_core::{BoardGenerator, Dictionary, GameAction, GameConfig, HexCoord};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    /// All active games
    pub games: DashMap<Uuid, PlayerGame>,
    /// Mapping from player ID to their game ID
    pub player_games: DashMap<Uuid, Uuid>,
    /// Mapping from player ID to their message sender
    pub player_senders: DashMap<Uuid, mpsc::UnboundedSender<ServerMessage>>,
    /// Word list shared by every game
    pub dictionary: Arc<Dictionary>,
    pub config: Arc<GameConfig>,
    pub generator: Arc<BoardGenerator>,
}

impl ServerState {
    pub fn new(dictionary: Dictionary, config: GameConfig, generator: BoardGenerator) -> Self {
        Self {
            games: DashMap::new(),
            player_games: DashMap::new(),
            player_senders: DashMap::new(),
            dictionary: Arc::new(dictionary),
            config: Arc::new(config),
            generator: Arc::new(generator),
        }
    }

    /// Send a message to a specific player.
    pub fn send_to_player(&self, player_id: Uuid, msg: ServerMessage) {
        if let Some(sender) = self.player_senders.get(&player_id) {
            let _ = sender.send(msg);
        }
    }

    fn send_error(&self, player_id: Uuid, err: impl ToString) {
        self.send_to_player(
            player_id,
            ServerMessage::Error {
                message: err.to_string(),
            },
        );
    }

    /// Run `f` on the player's active game.
    ///
    /// The game is taken out of the map while `f` runs, so a long board search
    /// never holds a shard lock that other players' games share.
    fn with_game<T>(
        &self,
        player_id: Uuid,
        f: impl FnOnce(&mut PlayerGame) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let game_id = *self
            .player_games
            .get(&player_id)
            .ok_or(SessionError::NoActiveGame)?;
        let (_, mut game) = self
            .games
            .remove(&game_id)
            .ok_or(SessionError::NoActiveGame)?;
        let result = f(&mut game);
        self.games.insert(game_id, game);
        result
    }

    /// Drop the player's game, returning its ID if there was one.
    fn end_game(&self, player_id: Uuid) -> Option<Uuid> {
        let (_, game_id) = self.player_games.remove(&player_id)?;
        self.games.remove(&game_id);
        info!(%player_id, %game_id, "Game ended");
        Some(game_id)
    }
}

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Hexword server listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let player_id = Uuid::new_v4();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.player_senders.insert(player_id, tx);

    let welcome = ServerMessage::Welcome { player_id };
    let msg_text = serde_json::to_string(&welcome)?;
    ws_sender.send(Message::Text(msg_text.into())).await?;

    // Forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(text) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                // A submission can finish the game and run the board-wide search
                Ok(ClientMessage::SubmitWord) => {
                    let state = Arc::clone(&state);
                    tokio::task::spawn_blocking(move || {
                        handle_message(player_id, ClientMessage::SubmitWord, &state)
                    })
                    .await?;
                }
                Ok(client_msg) => handle_message(player_id, client_msg, &state),
                Err(e) => {
                    warn!("Invalid message from {}: {}", player_id, text);
                    state.send_error(player_id, format!("Invalid message: {}", e));
                }
            },
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", player_id);
                break;
            }
            Ok(Message::Ping(_)) => {
                state.send_to_player(player_id, ServerMessage::Pong);
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", player_id, e);
                break;
            }
            _ => {}
        }
    }

    // Clean up on disconnect
    state.end_game(player_id);
    state.player_senders.remove(&player_id);
    send_task.abort();

    info!("Connection closed for {}", player_id);
    Ok(())
}

/// Handle a client message.
fn handle_message(player_id: Uuid, msg: ClientMessage, state: &ServerState) {
    match msg {
        ClientMessage::NewGame => {
            state.end_game(player_id);

            let game_id = Uuid::new_v4();
            match PlayerGame::new(
                game_id,
                player_id,
                &state.config,
                &state.generator,
                Arc::clone(&state.dictionary),
            ) {
                Ok(game) => {
                    let snapshot = game.snapshot();
                    state.games.insert(game_id, game);
                    state.player_games.insert(player_id, game_id);
                    info!(%player_id, %game_id, "Game started");

                    state.send_to_player(
                        player_id,
                        ServerMessage::GameStarted {
                            game_id,
                            state: snapshot,
                        },
                    );
                }
                Err(e) => {
                    error!(%player_id, "Could not start game: {}", e);
                    state.send_error(player_id, e);
                }
            }
        }

        ClientMessage::SelectTile { q, r } => {
            apply_game_action(player_id, GameAction::SelectTile(HexCoord::new(q, r)), state)
        }

        ClientMessage::ClearPath => apply_game_action(player_id, GameAction::ClearPath, state),

        ClientMessage::SubmitWord => apply_game_action(player_id, GameAction::SubmitWord, state),

        ClientMessage::GetState => match state.with_game(player_id, |game| Ok(game.snapshot())) {
            Ok(snapshot) => {
                state.send_to_player(player_id, ServerMessage::GameState { state: snapshot })
            }
            Err(e) => state.send_error(player_id, e),
        },

        ClientMessage::EndGame => match state.end_game(player_id) {
            Some(game_id) => state.send_to_player(player_id, ServerMessage::GameEnded { game_id }),
            None => state.send_error(player_id, SessionError::NoActiveGame),
        },

        ClientMessage::Ping => {
            state.send_to_player(player_id, ServerMessage::Pong);
        }
    }
}

/// Apply an action to the player's game and report the outcome.
fn apply_game_action(player_id: Uuid, action: GameAction, state: &ServerState) {
    debug!(%player_id, ?action, "Applying action");

    let result = state.with_game(player_id, |game| {
        let events = game.apply_action(action)?;
        Ok((events, game.snapshot(), game.summary()))
    });

    match result {
        Ok((events, snapshot, summary)) => {
            state.send_to_player(
                player_id,
                ServerMessage::ActionResult {
                    success: true,
                    events,
                    error: None,
                },
            );
            state.send_to_player(player_id, ServerMessage::GameState { state: snapshot });

            if let Some(summary) = summary {
                info!(%player_id, score = summary.total_score, "Game finished");
                state.send_to_player(player_id, ServerMessage::GameOver { summary });
            }
        }
        Err(e) => {
            state.send_to_player(
                player_id,
                ServerMessage::ActionResult {
                    success: false,
                    events: vec![],
                    error: Some(e.to_string()),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexword_core::{GameEvent, LetterPool, LetterScores, Rejection, SeedWords};

    fn connect(state: &ServerState) -> (Uuid, mpsc::UnboundedReceiver<ServerMessage>) {
        let player_id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();
        state.player_senders.insert(player_id, tx);
        (player_id, rx)
    }

    fn state(submissions: usize) -> ServerState {
        let config = GameConfig {
            submissions_per_game: submissions,
            ..GameConfig::default()
        };
        let dictionary = Dictionary::from_words(["construction"]).unwrap();
        ServerState::new(dictionary, config, BoardGenerator::default())
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    #[test]
    fn test_actions_without_game_fail() {
        let state = state(10);
        let (player_id, mut rx) = connect(&state);

        handle_message(player_id, ClientMessage::SubmitWord, &state);
        handle_message(player_id, ClientMessage::GetState, &state);

        let messages = drain(&mut rx);
        assert!(matches!(
            &messages[0],
            ServerMessage::ActionResult { success: false, error: Some(e), .. } if e == "No active game"
        ));
        assert!(matches!(&messages[1], ServerMessage::Error { .. }));
    }

    #[test]
    fn test_new_game_and_rejected_submission() {
        let state = state(10);
        let (player_id, mut rx) = connect(&state);

        handle_message(player_id, ClientMessage::NewGame, &state);
        let messages = drain(&mut rx);
        let ServerMessage::GameStarted { game_id, state: snapshot } = &messages[0] else {
            panic!("expected GameStarted, got {:?}", messages[0]);
        };
        assert_eq!(snapshot.board.len(), 61);
        assert_eq!(state.player_games.get(&player_id).map(|g| *g), Some(*game_id));

        handle_message(player_id, ClientMessage::SubmitWord, &state);
        let messages = drain(&mut rx);
        let ServerMessage::ActionResult { success, events, .. } = &messages[0] else {
            panic!("expected ActionResult, got {:?}", messages[0]);
        };
        assert!(success);
        assert!(matches!(
            events[0],
            GameEvent::WordRejected {
                reason: Rejection::TooShort { length: 0, minimum: 4 }
            }
        ));
        assert!(matches!(messages[1], ServerMessage::GameState { .. }));
    }

    #[test]
    fn test_seed_word_finishes_game() {
        let generator = BoardGenerator::new(
            SeedWords::new(["construction"]).unwrap(),
            LetterPool::default(),
            LetterScores::default(),
        );
        let config = GameConfig {
            submissions_per_game: 1,
            ..GameConfig::default()
        };
        let dictionary = Dictionary::from_words(["construction"]).unwrap();
        let state = ServerState::new(dictionary, config, generator);
        let (player_id, mut rx) = connect(&state);
        handle_message(player_id, ClientMessage::NewGame, &state);
        drain(&mut rx);

        let game_id = *state.player_games.get(&player_id).unwrap();
        let path = state.games.get(&game_id).unwrap().snapshot().board.seed().unwrap().path.clone();
        for coord in path {
            handle_message(
                player_id,
                ClientMessage::SelectTile {
                    q: coord.q,
                    r: coord.r,
                },
                &state,
            );
        }
        drain(&mut rx);

        handle_message(player_id, ClientMessage::SubmitWord, &state);
        let messages = drain(&mut rx);
        let ServerMessage::ActionResult { success, events, .. } = &messages[0] else {
            panic!("expected ActionResult, got {:?}", messages[0]);
        };
        assert!(success);
        assert!(matches!(
            &events[0],
            GameEvent::WordAccepted { word, .. } if word == "construction"
        ));
        assert!(matches!(
            messages.last(),
            Some(ServerMessage::GameOver { summary }) if summary.total_score > 0
        ));
    }

    #[test]
    fn test_end_game_and_reconnect_cleanup() {
        let state = state(10);
        let (player_id, mut rx) = connect(&state);

        handle_message(player_id, ClientMessage::NewGame, &state);
        handle_message(player_id, ClientMessage::NewGame, &state);
        assert_eq!(state.games.len(), 1);

        handle_message(player_id, ClientMessage::EndGame, &state);
        assert!(state.games.is_empty());
        assert!(state.player_games.is_empty());

        let messages = drain(&mut rx);
        assert!(matches!(messages.last(), Some(ServerMessage::GameEnded { .. })));

        handle_message(player_id, ClientMessage::EndGame, &state);
        assert!(matches!(
            drain(&mut rx).as_slice(),
            [ServerMessage::Error { .. }]
        ));
    }

    #[test]
    fn test_game_leaves_map_while_action_runs() {
        let state = state(10);
        let (player_id, _rx) = connect(&state);
        let (other_id, _other_rx) = connect(&state);
        handle_message(player_id, ClientMessage::NewGame, &state);
        handle_message(other_id, ClientMessage::NewGame, &state);

        let game_id = *state.player_games.get(&player_id).unwrap();
        let other_game = *state.player_games.get(&other_id).unwrap();

        let seen = state
            .with_game(player_id, |game| {
                assert_eq!(game.id, game_id);
                // Other games stay writable while this one is busy
                assert!(state.games.get_mut(&other_game).is_some());
                Ok(state.games.contains_key(&game_id))
            })
            .unwrap();
        assert!(!seen);
        assert!(state.games.contains_key(&game_id));

        // The game is put back even when the action fails
        let err = state
            .with_game(player_id, |_| Err::<(), _>(SessionError::NoActiveGame))
            .unwrap_err();
        assert!(matches!(err, SessionError::NoActiveGame));
        assert_eq!(state.games.len(), 2);
    }

    #[test]
    fn test_ping() {
        let state = state(10);
        let (player_id, mut rx) = connect(&state);
        handle_message(player_id, ClientMessage::Ping, &state);
        assert!(matches!(drain(&mut rx).as_slice(), [ServerMessage::Pong]));
    }
}
