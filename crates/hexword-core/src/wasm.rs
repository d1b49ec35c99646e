//! WebAssembly bindings for the Hexword game engine.
//!
//! This module exposes the game engine to JavaScript through wasm-bindgen.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::{GameAction, GameEvent};
#[cfg(feature = "wasm")]
use crate::board::BoardGenerator;
#[cfg(feature = "wasm")]
use crate::config::GameConfig;
#[cfg(feature = "wasm")]
use crate::dictionary::Dictionary;
#[cfg(feature = "wasm")]
use crate::game::GameSession;
#[cfg(feature = "wasm")]
use crate::hex::HexCoord;
#[cfg(feature = "wasm")]
use std::sync::Arc;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a new game from a JSON array of dictionary words
    #[wasm_bindgen(constructor)]
    pub fn new(words_json: &str) -> Result<WasmGame, JsValue> {
        let words: Vec<String> = serde_json::from_str(words_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid word list: {}", e)))?;
        let dictionary =
            Dictionary::from_words(words).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let session = GameSession::new(
            GameConfig::default(),
            &BoardGenerator::default(),
            Arc::new(dictionary),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmGame { session })
    }

    fn apply(&mut self, action: GameAction) -> Result<String, JsValue> {
        match self.session.apply_action(action) {
            Ok(events) => Ok(events_json(&events)),
            Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
        }
    }

    /// Add a tile to the current path, returns events JSON or error
    #[wasm_bindgen(js_name = selectTile)]
    pub fn select_tile(&mut self, q: i32, r: i32) -> Result<String, JsValue> {
        self.apply(GameAction::SelectTile(HexCoord::new(q, r)))
    }

    /// Drop the current path
    #[wasm_bindgen(js_name = clearPath)]
    pub fn clear_path(&mut self) -> Result<String, JsValue> {
        self.apply(GameAction::ClearPath)
    }

    /// Submit the current path as a word
    #[wasm_bindgen(js_name = submitWord)]
    pub fn submit_word(&mut self) -> Result<String, JsValue> {
        self.apply(GameAction::SubmitWord)
    }

    /// Get board state as JSON (for rendering)
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        serde_json::to_string(&self.session.board().to_json_friendly())
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the whole session as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the end-of-game summary as JSON, or "null" while playing
    #[wasm_bindgen(js_name = getSummary)]
    pub fn get_summary(&self) -> String {
        serde_json::to_string(&self.session.summary()).unwrap_or_else(|_| "null".to_string())
    }

    /// Get the current total score
    #[wasm_bindgen(js_name = getTotalScore)]
    pub fn get_total_score(&self) -> u32 {
        self.session.total_score()
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }
}

#[cfg(feature = "wasm")]
fn events_json(events: &[GameEvent]) -> String {
    serde_json::to_string(events).unwrap_or_else(|_| "[]".to_string())
}
