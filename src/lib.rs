//! Road Dodge - A two-lane arcade dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, score clock, game state)
//! - `settings`: Data-driven game balance, loadable from JSON
//! - `web`: Browser binding for the frame driver (wasm32 only)

pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{Settings, SettingsError};
pub use sim::{Difficulty, Direction, Game, GamePhase, Snapshot};

/// Default game balance constants
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player car defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Movement per tick while a direction is held
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance from the top of the player to the bottom edge at start
    pub const PLAYER_BOTTOM_MARGIN: f32 = 100.0;

    /// Obstacle (oncoming car) defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 80.0;
    pub const OBSTACLE_VARIANTS: u8 = 3;
    pub const OBSTACLE_SPAWN_INTERVAL_MS: f64 = 500.0;

    /// Bonus item defaults
    pub const BONUS_WIDTH: f32 = 30.0;
    pub const BONUS_HEIGHT: f32 = 30.0;
    pub const BONUS_SPAWN_INTERVAL_MS: f64 = 15_000.0;
    /// Chance that a due bonus spawn is skipped
    pub const BONUS_SUPPRESS_PROBABILITY: f64 = 0.4;
    pub const BONUS_SCORE: u64 = 5;

    /// Score clock
    pub const SCORE_INTERVAL_MS: f64 = 1000.0;
    /// Speed ramps up every time the score reaches a multiple of this
    pub const RAMP_EVERY: u64 = 10;
    pub const RAMP_STEP: f32 = 0.5;

    /// Length of one dash + gap of the road centre line
    pub const ROAD_DASH_WRAP: f32 = 60.0;
}
