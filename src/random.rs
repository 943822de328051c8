//! Random sources driving demand jitter and claim draws
//!
//! The engine never touches a global generator. Every draw goes through a
//! [`RandomSource`] handed to it at construction, so a run can be seeded,
//! scripted, or pinned to fixed values.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random draws
pub trait RandomSource {
    /// Uniform integer in `[min, max]` (both ends inclusive)
    fn next_int(&mut self, min: i64, max: i64) -> i64;

    /// Uniform float in `[min, max)`
    fn next_float(&mut self, min: f64, max: f64) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        (**self).next_int(min, max)
    }

    fn next_float(&mut self, min: f64, max: f64) -> f64 {
        (**self).next_float(min, max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        (**self).next_int(min, max)
    }

    fn next_float(&mut self, min: f64, max: f64) -> f64 {
        (**self).next_float(min, max)
    }
}

/// Seeded ChaCha generator; the same seed replays the same game
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a fresh seed from the thread generator
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn next_float(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

/// Deterministic source: integers land on the range midpoint, floats on the
/// lower bound.
///
/// With the default market this means zero demand jitter, 13 claims per line
/// and zero damage on every claim.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointRandom;

impl RandomSource for MidpointRandom {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        min + (max - min) / 2
    }

    fn next_float(&mut self, min: f64, _max: f64) -> f64 {
        min
    }
}

/// Replays queued values in order, falling back to [`MidpointRandom`] once a
/// queue runs dry. Queued values are clamped into the requested range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<i64>,
    floats: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new(ints: impl IntoIterator<Item = i64>, floats: impl IntoIterator<Item = f64>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            floats: floats.into_iter().collect(),
        }
    }

    pub fn push_int(&mut self, value: i64) {
        self.ints.push_back(value);
    }

    pub fn push_float(&mut self, value: f64) {
        self.floats.push_back(value);
    }

    /// Values not yet consumed (ints, floats)
    pub fn remaining(&self) -> (usize, usize) {
        (self.ints.len(), self.floats.len())
    }
}

impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        match self.ints.pop_front() {
            Some(v) => v.clamp(min, max.max(min)),
            None => MidpointRandom.next_int(min, max),
        }
    }

    fn next_float(&mut self, min: f64, max: f64) -> f64 {
        match self.floats.pop_front() {
            Some(v) => v.max(min).min(max),
            None => MidpointRandom.next_float(min, max),
        }
    }
}
