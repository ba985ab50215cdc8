//! Time-gated spawning of obstacles and bonus items
//!
//! Spawns appear just above the visible area at a random x and fall at the
//! game speed current at spawn time.

use super::clock::IntervalTimer;
use super::geometry::Rect;
use super::rng::RandomSource;
use super::state::{BonusItem, EntityIds, Obstacle};
use crate::settings::{BonusSettings, ObstacleSettings, PlayfieldSettings};

/// Result of a bonus spawn check
#[derive(Debug, Clone, PartialEq)]
pub enum BonusSpawn {
    /// Timer has not elapsed
    NotDue,
    /// Timer elapsed but the random gate skipped this cycle
    Suppressed,
    Spawned(BonusItem),
}

impl BonusSpawn {
    pub fn into_item(self) -> Option<BonusItem> {
        match self {
            BonusSpawn::Spawned(item) => Some(item),
            _ => None,
        }
    }
}

/// Spawn an obstacle if the obstacle interval has elapsed.
///
/// Draws x first, then the variant.
pub fn maybe_spawn_obstacle(
    now: f64,
    timer: &mut IntervalTimer,
    ids: &mut EntityIds,
    speed: f32,
    field: &PlayfieldSettings,
    cfg: &ObstacleSettings,
    rng: &mut dyn RandomSource,
) -> Option<Obstacle> {
    if !timer.poll(now) {
        return None;
    }
    let x = rng.next_range(field.width - cfg.width);
    let variant = rng.next_index(cfg.variants.max(1) as usize) as u8;
    Some(Obstacle {
        id: ids.allocate(),
        rect: Rect::new(x, -cfg.height, cfg.width, cfg.height),
        speed,
        variant,
    })
}

/// Spawn a bonus item if the bonus interval has elapsed and the random gate allows it.
///
/// The timer resets on every due check, including suppressed ones.
pub fn maybe_spawn_bonus(
    now: f64,
    timer: &mut IntervalTimer,
    ids: &mut EntityIds,
    speed: f32,
    field: &PlayfieldSettings,
    cfg: &BonusSettings,
    rng: &mut dyn RandomSource,
) -> BonusSpawn {
    if !timer.poll(now) {
        return BonusSpawn::NotDue;
    }
    if rng.next_unit() < cfg.suppress_probability {
        return BonusSpawn::Suppressed;
    }
    let x = rng.next_range(field.width - cfg.width);
    BonusSpawn::Spawned(BonusItem {
        id: ids.allocate(),
        rect: Rect::new(x, -cfg.height, cfg.width, cfg.height),
        speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRandom;

    fn ids_from(first: u32) -> EntityIds {
        let mut ids = EntityIds::default();
        for _ in 1..first {
            ids.allocate();
        }
        ids
    }

    #[test]
    fn test_obstacle_not_due() {
        let mut timer = IntervalTimer::anchored(500.0, 0.0);
        let mut rng = ScriptedRandom::new(vec![0.5]);
        let spawned = maybe_spawn_obstacle(
            500.0,
            &mut timer,
            &mut ids_from(1),
            3.0,
            &PlayfieldSettings::default(),
            &ObstacleSettings::default(),
            &mut rng,
        );
        assert!(spawned.is_none());
        assert_eq!(rng.draws(), 0);
        assert_eq!(timer.last_fire, Some(0.0));
    }

    #[test]
    fn test_obstacle_spawn_position_and_variant() {
        let mut timer = IntervalTimer::anchored(500.0, 0.0);
        let mut rng = ScriptedRandom::new(vec![0.5, 0.7]);
        let obstacle = maybe_spawn_obstacle(
            501.0,
            &mut timer,
            &mut ids_from(9),
            3.0,
            &PlayfieldSettings::default(),
            &ObstacleSettings::default(),
            &mut rng,
        )
        .unwrap();

        // x in [0, 400 - 50]
        assert_eq!(obstacle.id, 9);
        assert_eq!(obstacle.rect.pos.x, 175.0);
        assert_eq!(obstacle.rect.pos.y, -80.0);
        assert_eq!(obstacle.rect.size.x, 50.0);
        assert_eq!(obstacle.speed, 3.0);
        assert_eq!(obstacle.variant, 2);
        assert_eq!(timer.last_fire, Some(501.0));
    }

    #[test]
    fn test_obstacle_x_range_extremes() {
        let field = PlayfieldSettings::default();
        let cfg = ObstacleSettings::default();
        let mut timer = IntervalTimer::anchored(500.0, 0.0);
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.999_999, 0.0]);

        let low = maybe_spawn_obstacle(501.0, &mut timer, &mut ids_from(1), 2.0, &field, &cfg, &mut rng).unwrap();
        assert_eq!(low.rect.left(), 0.0);

        let high = maybe_spawn_obstacle(1002.0, &mut timer, &mut ids_from(2), 2.0, &field, &cfg, &mut rng).unwrap();
        assert!(high.rect.right() <= field.width);
    }

    #[test]
    fn test_bonus_suppressed_still_resets_timer() {
        let mut timer = IntervalTimer::anchored(15_000.0, 0.0);
        let mut rng = ScriptedRandom::new(vec![0.39]);
        let result = maybe_spawn_bonus(
            15_001.0,
            &mut timer,
            &mut ids_from(1),
            2.0,
            &PlayfieldSettings::default(),
            &BonusSettings::default(),
            &mut rng,
        );
        assert_eq!(result, BonusSpawn::Suppressed);
        assert_eq!(timer.last_fire, Some(15_001.0));
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_bonus_spawned() {
        let mut timer = IntervalTimer::anchored(15_000.0, 0.0);
        let mut rng = ScriptedRandom::new(vec![0.4, 0.5]);
        let item = maybe_spawn_bonus(
            15_001.0,
            &mut timer,
            &mut ids_from(4),
            2.5,
            &PlayfieldSettings::default(),
            &BonusSettings::default(),
            &mut rng,
        )
        .into_item()
        .unwrap();

        assert_eq!(item.id, 4);
        // x = 0.5 * (400 - 30)
        assert_eq!(item.rect.pos.x, 185.0);
        assert_eq!(item.rect.pos.y, -30.0);
        assert_eq!(item.speed, 2.5);
    }

    #[test]
    fn test_bonus_not_due() {
        let mut timer = IntervalTimer::anchored(15_000.0, 0.0);
        let mut rng = ScriptedRandom::new(vec![0.9]);
        let result = maybe_spawn_bonus(
            14_000.0,
            &mut timer,
            &mut ids_from(1),
            2.0,
            &PlayfieldSettings::default(),
            &BonusSettings::default(),
            &mut rng,
        );
        assert_eq!(result, BonusSpawn::NotDue);
        assert_eq!(rng.draws(), 0);
    }
}
