//! Injectable randomness for deterministic simulation.
//!
//! The simulation never reaches for a global RNG. Hosts inject a
//! `RandomSource` at session creation; `SeededSource` is the production
//! implementation, `ScriptedSource` replays fixed draws for tests and
//! replay tooling.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::ArenaError;

/// Source of randomness for spawn decisions.
pub trait RandomSource {
    /// Uniform integer in the inclusive range `[lo, hi]`.
    fn uniform_int(&mut self, lo: u32, hi: u32) -> Result<u32, ArenaError>;

    /// Uniform float in the half-open range `[lo, hi)`.
    fn uniform_float(&mut self, lo: f32, hi: f32) -> Result<f32, ArenaError>;
}

/// PCG-backed source, seeded for reproducible runs.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: Pcg32,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn uniform_int(&mut self, lo: u32, hi: u32) -> Result<u32, ArenaError> {
        if lo > hi {
            return Err(ArenaError::random_source(format!(
                "empty integer range [{lo}, {hi}]"
            )));
        }
        Ok(self.rng.random_range(lo..=hi))
    }

    fn uniform_float(&mut self, lo: f32, hi: f32) -> Result<f32, ArenaError> {
        // A degenerate range collapses to its lower bound.
        if hi <= lo {
            return Ok(lo);
        }
        Ok(self.rng.random_range(lo..hi))
    }
}

/// Replays fixed sequences of draws; errors once a sequence runs dry.
///
/// Bounds passed by the caller are not checked against the scripted values;
/// the script author owns them.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    ints: VecDeque<u32>,
    floats: VecDeque<f32>,
}

impl ScriptedSource {
    pub fn new(ints: &[u32], floats: &[f32]) -> Self {
        Self {
            ints: ints.iter().copied().collect(),
            floats: floats.iter().copied().collect(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn uniform_int(&mut self, _lo: u32, _hi: u32) -> Result<u32, ArenaError> {
        self.ints
            .pop_front()
            .ok_or_else(|| ArenaError::random_source("scripted integer sequence exhausted"))
    }

    fn uniform_float(&mut self, _lo: f32, _hi: f32) -> Result<f32, ArenaError> {
        self.floats
            .pop_front()
            .ok_or_else(|| ArenaError::random_source("scripted float sequence exhausted"))
    }
}
