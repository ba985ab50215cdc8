//! Game state machine
//!
//! Owns the current session, held input and the random source, and exposes
//! the surface a frame driver talks to: start, update, pause, steer, restart.

use rand_pcg::Pcg32;
use serde::Serialize;

use super::rng::{RandomSource, seeded};
use super::state::{BonusItem, Difficulty, Direction, GameEvent, GamePhase, Obstacle, Player, Session};
use super::tick::{TickInput, tick};
use crate::settings::Settings;

/// Read-only view of the game for the presentation layer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub difficulty: Option<Difficulty>,
    pub score: u64,
    pub speed: f32,
    pub road_offset: f32,
    pub player: Option<&'a Player>,
    pub obstacles: &'a [Obstacle],
    pub bonuses: &'a [BonusItem],
    /// What happened during the latest update
    pub events: &'a [GameEvent],
}

/// A game: zero or one active session plus everything that outlives it
pub struct Game<R = Pcg32> {
    settings: Settings,
    rng: R,
    input: TickInput,
    session: Option<Session>,
}

impl Game<Pcg32> {
    /// New game using the seeded PCG generator
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self::with_random(settings, seeded(seed))
    }
}

impl<R: RandomSource> Game<R> {
    /// New game with a caller-supplied random source
    pub fn with_random(settings: Settings, rng: R) -> Self {
        Self {
            settings,
            rng,
            input: TickInput::default(),
            session: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> GamePhase {
        self.session
            .as_ref()
            .map_or(GamePhase::NotStarted, |s| s.phase)
    }

    pub fn input(&self) -> &TickInput {
        &self.input
    }

    /// Begin a fresh session at the given difficulty (from any phase)
    pub fn start(&mut self, difficulty: Difficulty) {
        log::info!(
            "Starting {} game (speed {})",
            difficulty.as_str(),
            difficulty.initial_speed()
        );
        self.session = Some(Session::new(self.settings.clone(), difficulty));
    }

    /// Start again at the current difficulty. Does nothing before the first start.
    pub fn restart(&mut self) {
        match self.session.as_ref().map(|s| s.difficulty) {
            Some(difficulty) => self.start(difficulty),
            None => log::warn!("Restart requested before any game was started"),
        }
    }

    /// Advance one frame at timestamp `now` (milliseconds)
    pub fn update(&mut self, now: f64) -> Snapshot<'_> {
        if let Some(session) = self.session.as_mut() {
            let was_running = session.phase == GamePhase::Running;
            tick(session, &self.input, now, &mut self.rng);
            if was_running && session.phase == GamePhase::Ended {
                log::info!("Game over - final score {}", session.score);
            }
        }
        self.snapshot()
    }

    /// Pause or resume. Only meaningful while running or paused.
    pub fn set_paused(&mut self, paused: bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.phase = match (session.phase, paused) {
            (GamePhase::Running, true) => {
                log::info!("Paused");
                GamePhase::Paused
            }
            (GamePhase::Paused, false) => {
                log::info!("Resumed");
                GamePhase::Running
            }
            (phase, _) => phase,
        };
    }

    pub fn toggle_pause(&mut self) {
        match self.phase() {
            GamePhase::Running => self.set_paused(true),
            GamePhase::Paused => self.set_paused(false),
            _ => {}
        }
    }

    /// Record a key going down or up
    pub fn set_input(&mut self, direction: Direction, pressed: bool) {
        self.input.set(direction, pressed);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        match &self.session {
            Some(s) => Snapshot {
                phase: s.phase,
                difficulty: Some(s.difficulty),
                score: s.score,
                speed: s.speed,
                road_offset: s.road_offset,
                player: Some(&s.player),
                obstacles: &s.obstacles,
                bonuses: &s.bonuses,
                events: &s.events,
            },
            None => Snapshot {
                phase: GamePhase::NotStarted,
                difficulty: None,
                score: 0,
                speed: 0.0,
                road_offset: 0.0,
                player: None,
                obstacles: &[],
                bonuses: &[],
                events: &[],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::rng::ScriptedRandom;

    fn scripted_game() -> Game<ScriptedRandom> {
        Game::with_random(Settings::default(), ScriptedRandom::new(vec![0.0]))
    }

    #[test]
    fn test_not_started_update_is_noop() {
        let mut game = scripted_game();
        let snap = game.update(1000.0);
        assert_eq!(snap.phase, GamePhase::NotStarted);
        assert!(snap.player.is_none());
        assert_eq!(game.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_start_resets() {
        let mut game = scripted_game();
        game.start(Difficulty::Easy);
        let snap = game.update(0.0);
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.speed, 2.0);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.difficulty, Some(Difficulty::Easy));

        let snap = game.update(1001.0);
        assert_eq!(snap.score, 1);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut game = scripted_game();
        game.start(Difficulty::Medium);
        game.update(0.0);
        game.set_input(Direction::Left, true);

        game.toggle_pause();
        assert_eq!(game.phase(), GamePhase::Paused);
        let x = game.snapshot().player.unwrap().rect.left();
        let snap = game.update(5000.0);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.player.unwrap().rect.left(), x);

        game.set_paused(false);
        assert_eq!(game.phase(), GamePhase::Running);
        // Elapsed time during the pause counts toward the score clock
        let snap = game.update(5001.0);
        assert_eq!(snap.score, 1);
        assert!(snap.player.unwrap().rect.left() < x);
    }

    #[test]
    fn test_pause_ignored_when_not_running() {
        let mut game = scripted_game();
        game.toggle_pause();
        assert_eq!(game.phase(), GamePhase::NotStarted);
        game.set_paused(true);
        assert_eq!(game.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_crash_then_restart() {
        let mut game = scripted_game();
        game.start(Difficulty::Hard);
        game.update(0.0);

        {
            let session = game.session.as_mut().unwrap();
            let player = session.player.rect;
            session.obstacles.push(Obstacle {
                id: 99,
                rect: Rect::new(player.left(), player.top(), 50.0, 80.0),
                speed: 5.0,
                variant: 0,
            });
        }
        let snap = game.update(16.0);
        assert_eq!(snap.phase, GamePhase::Ended);

        // Frozen after the crash
        game.toggle_pause();
        assert_eq!(game.phase(), GamePhase::Ended);
        let before_score = game.snapshot().score;
        let before_obstacles = game.snapshot().obstacles.to_vec();
        for i in 0..10 {
            game.update(10_000.0 * i as f64);
        }
        assert_eq!(game.snapshot().score, before_score);
        assert_eq!(game.snapshot().obstacles, before_obstacles.as_slice());

        game.restart();
        let snap = game.snapshot();
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.difficulty, Some(Difficulty::Hard));
        assert_eq!(snap.speed, 5.0);
        assert!(snap.obstacles.is_empty());
    }

    #[test]
    fn test_restart_before_start_is_noop() {
        let mut game = scripted_game();
        game.restart();
        assert_eq!(game.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_input_survives_restart() {
        let mut game = scripted_game();
        game.start(Difficulty::Easy);
        game.set_input(Direction::Up, true);
        game.restart();
        assert!(game.input().is_held(Direction::Up));
        game.set_input(Direction::Up, false);
        assert!(!game.input().is_held(Direction::Up));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut game = Game::new(Settings::default(), 7);
        game.start(Difficulty::Medium);
        let json = serde_json::to_string(&game.update(0.0)).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        assert!(json.contains("\"difficulty\":\"Medium\""));
    }
}
