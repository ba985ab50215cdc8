//! Browser binding
//!
//! The host page owns the canvas, the key listeners and the
//! `requestAnimationFrame` loop. Each frame it calls [`WebGame::update`] with
//! `performance.now()` and draws the returned JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{Difficulty, Direction, Game, seed_from_units};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Road Dodge starting...");
}

/// Map a `KeyboardEvent.key` value to a steering direction
fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// Game on a `width` x `height` canvas with a random 64-bit seed
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<WebGame, JsValue> {
        let seed = seed_from_units(js_sys::Math::random(), js_sys::Math::random());
        Self::with_seed(width, height, seed)
    }

    /// Game with a fixed seed (replays identically given the same timestamps)
    pub fn with_seed(width: f32, height: f32, seed: u64) -> Result<WebGame, JsValue> {
        let settings = Settings::with_playfield(width, height);
        settings
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(WebGame {
            game: Game::new(settings, seed),
        })
    }

    /// Start a session: "easy", "medium" or "hard"
    pub fn start(&mut self, difficulty: &str) -> Result<(), JsValue> {
        let difficulty = Difficulty::from_str(difficulty)
            .ok_or_else(|| JsValue::from_str(&format!("unknown difficulty `{difficulty}`")))?;
        self.game.start(difficulty);
        Ok(())
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    /// Advance one frame and return the snapshot as JSON
    pub fn update(&mut self, now: f64) -> Result<String, JsValue> {
        let snapshot = self.game.update(now);
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current snapshot as JSON without advancing
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.game.set_paused(paused);
    }

    pub fn toggle_pause(&mut self) {
        self.game.toggle_pause();
    }

    /// Forward a keydown (`pressed = true`) or keyup event.
    ///
    /// Arrow keys steer; Space toggles pause on keydown.
    pub fn set_key(&mut self, key: &str, pressed: bool) {
        if let Some(direction) = direction_for_key(key) {
            self.game.set_input(direction, pressed);
        } else if pressed && (key == " " || key == "Space") {
            self.game.toggle_pause();
        }
    }

    pub fn score(&self) -> f64 {
        self.game.snapshot().score as f64
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.game.phase())
    }
}
