//! Injectable random source
//!
//! Spawning only ever needs uniform values in `[0, 1)`. Games use a seeded
//! PCG generator; tests can script the exact sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform random values in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[0, max]` (`0` if `max` is not positive)
    fn next_range(&mut self, max: f32) -> f32 {
        (self.next_unit() * max.max(0.0) as f64) as f32
    }

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn next_index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

impl RandomSource for Pcg32 {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Create the default game RNG from a seed
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Build a 64-bit seed from two unit draws, 32 bits from each
pub fn seed_from_units(high: f64, low: f64) -> u64 {
    let bits = |unit: f64| (unit.clamp(0.0, 1.0) * u32::MAX as f64) as u32 as u64;
    (bits(high) << 32) | bits(low)
}

/// Replays a fixed list of values, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Values outside `[0, 1)` are clamped into it. An empty list yields zeros.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.0 })
            .collect();
        Self { values, cursor: 0 }
    }

    /// Number of values handed out so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
