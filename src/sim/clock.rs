//! Simulation clock, interval timers and the difficulty ramp
//!
//! Timestamps are milliseconds from a monotonic source (e.g. the browser's
//! `performance.now()`). The frame driver supplies them; nothing here reads a
//! wall clock.

use serde::{Deserialize, Serialize};

use crate::settings::{BonusSettings, ScoreSettings};

/// Rejects timestamps that go backwards or are not finite
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MonotonicClock {
    last: Option<f64>,
}

impl MonotonicClock {
    /// Sanitise a raw timestamp.
    ///
    /// Returns the timestamp to use for this tick: `now` if it moves forward,
    /// otherwise the last accepted one (zero elapsed time).
    pub fn accept(&mut self, now: f64) -> f64 {
        let accepted = match self.last {
            None if now.is_finite() => now.max(0.0),
            None => 0.0,
            Some(last) if now.is_finite() && now >= last => now,
            Some(last) => {
                log::warn!("Ignoring out-of-order timestamp {now} (last {last})");
                last
            }
        };
        self.last = Some(accepted);
        accepted
    }

    /// Last accepted timestamp
    pub fn last(&self) -> Option<f64> {
        self.last
    }
}

/// A repeating timer: `(last_fire, interval)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalTimer {
    /// When the timer last fired; `None` until anchored
    pub last_fire: Option<f64>,
    pub interval: f64,
}

impl IntervalTimer {
    pub fn new(interval: f64) -> Self {
        Self {
            last_fire: None,
            interval,
        }
    }

    /// Timer that counts from `now`
    pub fn anchored(interval: f64, now: f64) -> Self {
        Self {
            last_fire: Some(now),
            interval,
        }
    }

    /// Time since the last fire, never negative
    pub fn elapsed(&self, now: f64) -> f64 {
        self.last_fire.map_or(0.0, |last| (now - last).max(0.0))
    }

    /// Fire if strictly more than `interval` has passed, resetting to `now`.
    ///
    /// An unanchored timer anchors at `now` and does not fire.
    pub fn poll(&mut self, now: f64) -> bool {
        if self.last_fire.is_none() {
            self.last_fire = Some(now);
            return false;
        }
        if self.elapsed(now) > self.interval {
            self.last_fire = Some(now);
            true
        } else {
            false
        }
    }
}

/// Outcome of one score clock check
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreTick {
    pub score_delta: u64,
    pub speed_delta: f32,
}

impl ScoreTick {
    pub fn fired(&self) -> bool {
        self.score_delta > 0
    }
}

/// Advance the score clock.
///
/// Awards one point per elapsed interval. When the new score lands on a
/// multiple of `ramp_every`, the speed goes up by `ramp_step`.
pub fn tick_score(now: f64, timer: &mut IntervalTimer, score: u64, cfg: &ScoreSettings) -> ScoreTick {
    if !timer.poll(now) {
        return ScoreTick::default();
    }
    let new_score = score + 1;
    let speed_delta = if new_score % cfg.ramp_every.max(1) == 0 {
        cfg.ramp_step
    } else {
        0.0
    };
    ScoreTick {
        score_delta: 1,
        speed_delta,
    }
}

/// Points for picking up a bonus item (no speed effect)
#[inline]
pub fn on_bonus_collected(cfg: &BonusSettings) -> u64 {
    cfg.score
}
