//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same settings, timestamps, input
//! and random source, a session always plays out the same way:
//! - Timestamps come from the caller, never from a wall clock
//! - Randomness is injected through [`RandomSource`]
//! - No rendering or platform dependencies

pub mod clock;
pub mod game;
pub mod geometry;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{IntervalTimer, MonotonicClock, ScoreTick, on_bonus_collected, tick_score};
pub use game::{Game, Snapshot};
pub use geometry::{Rect, overlaps};
pub use rng::{RandomSource, ScriptedRandom, seed_from_units, seeded};
pub use spawn::{BonusSpawn, maybe_spawn_bonus, maybe_spawn_obstacle};
pub use state::{
    BonusItem, Difficulty, Direction, EntityIds, GameEvent, GamePhase, Obstacle, Player, Session,
};
pub use tick::{TickInput, tick};
