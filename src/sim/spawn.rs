//! Spawn strategies - how many obstacles each wave creates, and where.
//!
//! Two behaviors share one contract: advance a timer, and when a wave is
//! due, pick a set of distinct lanes. All randomness flows through the
//! injected `RandomSource`, so both variants replay deterministically.

use serde::{Deserialize, Serialize};

use crate::consts::CHAOS_MIN_DELAY;
use crate::error::ArenaError;

use super::rng::RandomSource;
use super::session::Mode;

/// Weighted spawn-count table for stochastic mode: (count, probability).
/// Walked cumulatively in order, so lighter waves are the common case.
const CHAOS_COUNT_WEIGHTS: [(u32, f32); 3] = [(1, 0.5), (2, 0.35), (3, 0.15)];

/// Per-mode spawn behavior and timing state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpawnStrategy {
    /// Waves of 2-4 obstacles land together, paced by the shared spawn
    /// interval from the difficulty ramp.
    SynchronizedWave { accumulator: f32 },
    /// Mostly single obstacles (sometimes pairs or triples) on an
    /// independent timer that redraws its delay after every wave.
    StochasticChaos { accumulator: f32, next_delay: f32 },
}

impl SpawnStrategy {
    /// Strategy for a session mode. The stochastic variant draws its first
    /// delay up front.
    pub fn for_mode(
        mode: Mode,
        spawn_interval: f32,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, ArenaError> {
        match mode {
            Mode::Synchronized => Ok(SpawnStrategy::SynchronizedWave { accumulator: 0.0 }),
            Mode::Stochastic => Ok(SpawnStrategy::StochasticChaos {
                accumulator: 0.0,
                next_delay: draw_chaos_delay(spawn_interval, rng)?,
            }),
        }
    }

    /// Advance the spawn timer; when a wave is due, pick its lanes.
    ///
    /// Returns an empty set on ticks with no spawn event. Selected lanes
    /// are distinct and never exceed `lane_count`.
    pub fn poll(
        &mut self,
        dt: f32,
        spawn_interval: f32,
        lane_count: usize,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<usize>, ArenaError> {
        match self {
            SpawnStrategy::SynchronizedWave { accumulator } => {
                *accumulator += dt;
                if *accumulator < spawn_interval {
                    return Ok(Vec::new());
                }
                *accumulator = 0.0;

                let count = rng.uniform_int(2, 4)?;
                sample_distinct_lanes(count as usize, lane_count, rng)
            }
            SpawnStrategy::StochasticChaos {
                accumulator,
                next_delay,
            } => {
                *accumulator += dt;
                if *accumulator < *next_delay {
                    return Ok(Vec::new());
                }
                *accumulator = 0.0;

                let count = chaos_spawn_count(rng)?;
                let lanes = sample_distinct_lanes(count as usize, lane_count, rng)?;
                *next_delay = draw_chaos_delay(spawn_interval, rng)?;
                Ok(lanes)
            }
        }
    }
}

/// Random delay until the next stochastic wave, bounded below so waves
/// never pile up back-to-back.
fn draw_chaos_delay(spawn_interval: f32, rng: &mut dyn RandomSource) -> Result<f32, ArenaError> {
    rng.uniform_float(CHAOS_MIN_DELAY.min(spawn_interval), spawn_interval)
}

/// Draw the stochastic spawn count from the weighted table.
fn chaos_spawn_count(rng: &mut dyn RandomSource) -> Result<u32, ArenaError> {
    let u = rng.uniform_float(0.0, 1.0)?;

    let mut cumulative = 0.0;
    for (count, probability) in CHAOS_COUNT_WEIGHTS {
        cumulative += probability;
        if u <= cumulative {
            return Ok(count);
        }
    }
    // Floating-point accumulation can leave the last bucket fractionally
    // short of 1.0.
    Ok(1)
}

/// Sample `count` distinct lanes uniformly without replacement.
///
/// A request for more lanes than exist is clamped, not rejected.
fn sample_distinct_lanes(
    count: usize,
    lane_count: usize,
    rng: &mut dyn RandomSource,
) -> Result<Vec<usize>, ArenaError> {
    let mut available: Vec<usize> = (0..lane_count).collect();
    let mut selected = Vec::with_capacity(count.min(lane_count));

    while selected.len() < count && !available.is_empty() {
        let idx = rng.uniform_int(0, available.len() as u32 - 1)? as usize;
        selected.push(available.remove(idx));
    }
    Ok(selected)
}
