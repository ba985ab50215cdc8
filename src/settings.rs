//! Game balance settings
//!
//! Every tunable number of the simulation lives here. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::geometry::Rect;

/// Error loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The JSON document could not be parsed
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its allowed range
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Visible simulation area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldSettings {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// Player car
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub width: f32,
    pub height: f32,
    /// Units moved per tick while a direction is held
    pub speed: f32,
    /// Gap between the player's top edge and the bottom of the playfield at start
    pub bottom_margin: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            bottom_margin: PLAYER_BOTTOM_MARGIN,
        }
    }
}

/// Falling obstacles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleSettings {
    pub width: f32,
    pub height: f32,
    /// Number of visual variants to pick from
    pub variants: u8,
    pub spawn_interval_ms: f64,
}

impl Default for ObstacleSettings {
    fn default() -> Self {
        Self {
            width: OBSTACLE_WIDTH,
            height: OBSTACLE_HEIGHT,
            variants: OBSTACLE_VARIANTS,
            spawn_interval_ms: OBSTACLE_SPAWN_INTERVAL_MS,
        }
    }
}

/// Falling bonus items
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusSettings {
    pub width: f32,
    pub height: f32,
    pub spawn_interval_ms: f64,
    /// A due spawn is skipped when the random draw falls below this
    pub suppress_probability: f64,
    /// Points awarded on pickup
    pub score: u64,
}

impl Default for BonusSettings {
    fn default() -> Self {
        Self {
            width: BONUS_WIDTH,
            height: BONUS_HEIGHT,
            spawn_interval_ms: BONUS_SPAWN_INTERVAL_MS,
            suppress_probability: BONUS_SUPPRESS_PROBABILITY,
            score: BONUS_SCORE,
        }
    }
}

/// Score clock and difficulty ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSettings {
    pub interval_ms: f64,
    pub ramp_every: u64,
    pub ramp_step: f32,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            interval_ms: SCORE_INTERVAL_MS,
            ramp_every: RAMP_EVERY,
            ramp_step: RAMP_STEP,
        }
    }
}

/// Complete game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield: PlayfieldSettings,
    pub player: PlayerSettings,
    pub obstacle: ObstacleSettings,
    pub bonus: BonusSettings,
    pub score: ScoreSettings,
    /// Wrap length of the scrolling road markings
    pub road_dash_wrap: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield: PlayfieldSettings::default(),
            player: PlayerSettings::default(),
            obstacle: ObstacleSettings::default(),
            bonus: BonusSettings::default(),
            score: ScoreSettings::default(),
            road_dash_wrap: ROAD_DASH_WRAP,
        }
    }
}

impl Settings {
    /// Default settings with a custom playfield size
    pub fn with_playfield(width: f32, height: f32) -> Self {
        let mut settings = Self::default();
        settings.playfield = PlayfieldSettings { width, height };
        settings
    }

    /// The playfield as a rectangle at the origin
    pub fn playfield_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.playfield.width, self.playfield.height)
    }

    /// Parse settings from JSON and validate them. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        fn interval(field: &'static str, value: f64) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number of milliseconds",
                })
            }
        }

        positive("playfield.width", self.playfield.width)?;
        positive("playfield.height", self.playfield.height)?;
        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("player.speed", self.player.speed)?;
        positive("obstacle.width", self.obstacle.width)?;
        positive("obstacle.height", self.obstacle.height)?;
        positive("bonus.width", self.bonus.width)?;
        positive("bonus.height", self.bonus.height)?;
        positive("road_dash_wrap", self.road_dash_wrap)?;
        interval("obstacle.spawn_interval_ms", self.obstacle.spawn_interval_ms)?;
        interval("bonus.spawn_interval_ms", self.bonus.spawn_interval_ms)?;
        interval("score.interval_ms", self.score.interval_ms)?;

        if self.player.width > self.playfield.width || self.player.height > self.playfield.height
        {
            return Err(SettingsError::Invalid {
                field: "player",
                reason: "player does not fit inside the playfield",
            });
        }
        if self.player.bottom_margin < 0.0 || !self.player.bottom_margin.is_finite() {
            return Err(SettingsError::Invalid {
                field: "player.bottom_margin",
                reason: "must be a non-negative number",
            });
        }
        if self.obstacle.variants == 0 {
            return Err(SettingsError::Invalid {
                field: "obstacle.variants",
                reason: "at least one variant is required",
            });
        }
        if !(0.0..=1.0).contains(&self.bonus.suppress_probability) {
            return Err(SettingsError::Invalid {
                field: "bonus.suppress_probability",
                reason: "must be between 0 and 1",
            });
        }
        if self.score.ramp_every == 0 {
            return Err(SettingsError::Invalid {
                field: "score.ramp_every",
                reason: "must be at least 1",
            });
        }
        if !(self.score.ramp_step.is_finite() && self.score.ramp_step >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "score.ramp_step",
                reason: "speed must never decrease",
            });
        }
        Ok(())
    }
}
