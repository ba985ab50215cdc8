//! Game state and core simulation types
//!
//! Everything that makes up one play session lives in [`Session`]; a new
//! session is built on every start/restart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::{IntervalTimer, MonotonicClock};
use super::geometry::Rect;
use crate::settings::Settings;

/// Difficulty tier, fixed for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Game speed at the start of a session
    pub fn initial_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 2.0,
            Difficulty::Medium => 3.0,
            Difficulty::Hard => 5.0,
        }
    }
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session has been started yet
    NotStarted,
    /// Active gameplay
    Running,
    /// Frozen until resumed
    Paused,
    /// Crashed into an obstacle; frozen until restart
    Ended,
}

/// A steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Units moved per tick while a direction is held
    pub speed: f32,
}

impl Player {
    /// Place a new player centred horizontally near the bottom of the playfield
    pub fn spawn(settings: &Settings) -> Self {
        let cfg = &settings.player;
        let field = &settings.playfield;
        let mut rect = Rect::new(
            field.width / 2.0 - cfg.width / 2.0,
            field.height - cfg.bottom_margin,
            cfg.width,
            cfg.height,
        );
        rect.clamp_within(&settings.playfield_rect());
        Self {
            rect,
            speed: cfg.speed,
        }
    }

    /// Move by `delta` units per axis, staying inside `bounds`
    pub fn steer(&mut self, delta: Vec2, bounds: &Rect) {
        self.rect.pos += delta * self.speed;
        self.rect.clamp_within(bounds);
    }
}

/// An oncoming car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    /// Fall speed in units per tick
    pub speed: f32,
    /// Visual variant index (no gameplay effect)
    pub variant: u8,
}

/// A collectible bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusItem {
    pub id: u32,
    pub rect: Rect,
    /// Fall speed in units per tick
    pub speed: f32,
}

/// Hands out entity IDs, starting at 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Something that happened during a tick, for sound and visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32 },
    BonusSpawned { id: u32 },
    /// A bonus spawn was due but the random gate skipped it
    BonusSuppressed,
    ScoreTick { score: u64 },
    SpeedUp { speed: f32 },
    BonusCollected { id: u32, score: u64 },
    Crashed { obstacle_id: u32, score: u64 },
}

/// One play session (serializable, deterministic given timestamps and RNG)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub settings: Settings,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub score: u64,
    /// Current game speed, only ever increases
    pub speed: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub bonuses: Vec<BonusItem>,
    pub obstacle_timer: IntervalTimer,
    pub bonus_timer: IntervalTimer,
    pub score_timer: IntervalTimer,
    pub clock: MonotonicClock,
    /// Scroll offset of the road markings (cosmetic)
    pub road_offset: f32,
    /// Number of running ticks processed
    pub time_ticks: u64,
    /// Events produced by the latest update
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    pub ids: EntityIds,
}

impl Session {
    /// Fresh session in the `Running` phase. Timers anchor at the first tick.
    pub fn new(settings: Settings, difficulty: Difficulty) -> Self {
        let player = Player::spawn(&settings);
        let obstacle_timer = IntervalTimer::new(settings.obstacle.spawn_interval_ms);
        let bonus_timer = IntervalTimer::new(settings.bonus.spawn_interval_ms);
        let score_timer = IntervalTimer::new(settings.score.interval_ms);
        Self {
            settings,
            difficulty,
            phase: GamePhase::Running,
            score: 0,
            speed: difficulty.initial_speed(),
            player,
            obstacles: Vec::new(),
            bonuses: Vec::new(),
            obstacle_timer,
            bonus_timer,
            score_timer,
            clock: MonotonicClock::default(),
            road_offset: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            ids: EntityIds::default(),
        }
    }

    /// Set a new game speed and apply it to every live entity
    pub fn set_speed(&mut self, speed: f32) {
        // Never slow down within a session
        self.speed = self.speed.max(speed);
        for obstacle in &mut self.obstacles {
            obstacle.speed = self.speed;
        }
        for bonus in &mut self.bonuses {
            bonus.speed = self.speed;
        }
    }

    pub fn end(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Ended;
        }
    }
}
