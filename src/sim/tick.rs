//! Per-frame simulation tick
//!
//! Core game loop that advances a running session by one frame.

use glam::Vec2;

use super::clock::{on_bonus_collected, tick_score};
use super::geometry::overlaps;
use super::rng::RandomSource;
use super::spawn::{BonusSpawn, maybe_spawn_bonus, maybe_spawn_obstacle};
use super::state::{Direction, GameEvent, GamePhase, Session};

/// Held steering keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Unit steps per axis (opposite keys cancel)
    pub fn steering(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the session by one frame at timestamp `now` (milliseconds)
pub fn tick(state: &mut Session, input: &TickInput, now: f64, rng: &mut dyn RandomSource) {
    // Time keeps flowing through the clock even when frozen, so timers see
    // the real elapsed time after a pause.
    let now = state.clock.accept(now);
    state.events.clear();

    if state.phase != GamePhase::Running {
        // Frozen: only the clock and the per-update event list move
        return;
    }

    state.time_ticks += 1;

    // Steering
    let bounds = state.settings.playfield_rect();
    state.player.steer(input.steering(), &bounds);

    // Spawning
    if let Some(obstacle) = maybe_spawn_obstacle(
        now,
        &mut state.obstacle_timer,
        &mut state.ids,
        state.speed,
        &state.settings.playfield,
        &state.settings.obstacle,
        rng,
    ) {
        log::debug!("Obstacle {} spawned at x={:.1}", obstacle.id, obstacle.rect.left());
        state.events.push(GameEvent::ObstacleSpawned { id: obstacle.id });
        state.obstacles.push(obstacle);
    }

    match maybe_spawn_bonus(
        now,
        &mut state.bonus_timer,
        &mut state.ids,
        state.speed,
        &state.settings.playfield,
        &state.settings.bonus,
        rng,
    ) {
        BonusSpawn::Spawned(bonus) => {
            log::debug!("Bonus {} spawned at x={:.1}", bonus.id, bonus.rect.left());
            state.events.push(GameEvent::BonusSpawned { id: bonus.id });
            state.bonuses.push(bonus);
        }
        BonusSpawn::Suppressed => state.events.push(GameEvent::BonusSuppressed),
        BonusSpawn::NotDue => {}
    }

    // Score clock and ramp
    let score_tick = tick_score(now, &mut state.score_timer, state.score, &state.settings.score);
    if score_tick.fired() {
        state.score += score_tick.score_delta;
        state.events.push(GameEvent::ScoreTick { score: state.score });
        if score_tick.speed_delta > 0.0 {
            state.set_speed(state.speed + score_tick.speed_delta);
            log::debug!("Speed up to {} at score {}", state.speed, state.score);
            state.events.push(GameEvent::SpeedUp { speed: state.speed });
        }
    }

    // Movement
    for obstacle in &mut state.obstacles {
        obstacle.rect.pos.y += obstacle.speed;
    }
    for bonus in &mut state.bonuses {
        bonus.rect.pos.y += bonus.speed;
    }

    let floor = state.settings.playfield.height;
    state.obstacles.retain(|o| !o.rect.is_below(floor));

    // Obstacle collisions end the run immediately
    let player = state.player.rect;
    let crash = state
        .obstacles
        .iter()
        .find(|o| overlaps(&player, &o.rect))
        .map(|o| o.id);
    if let Some(obstacle_id) = crash {
        state.end();
        log::info!("Crashed into obstacle {} with score {}", obstacle_id, state.score);
        state.events.push(GameEvent::Crashed {
            obstacle_id,
            score: state.score,
        });
        return;
    }

    // Bonus pickups
    let award = on_bonus_collected(&state.settings.bonus);
    let mut collected = Vec::new();
    state.bonuses.retain(|b| {
        if overlaps(&player, &b.rect) {
            collected.push(b.id);
            false
        } else {
            !b.rect.is_below(floor)
        }
    });
    for id in collected {
        state.score += award;
        state.events.push(GameEvent::BonusCollected {
            id,
            score: state.score,
        });
    }

    // Road markings
    state.road_offset += state.speed;
    if state.road_offset > state.settings.road_dash_wrap {
        state.road_offset = 0.0;
    }
}
