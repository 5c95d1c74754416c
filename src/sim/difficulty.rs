//! Difficulty ramp - speed up and tighten spawns as the score grows.
//!
//! Monotonic over a session's lifetime: obstacle speed only rises toward its
//! ceiling, the spawn interval only shrinks toward its floor.

use serde::{Deserialize, Serialize};

use crate::config::ArenaConfig;
use crate::consts::{INTERVAL_DECAY_FACTOR, SPEED_GROWTH_FACTOR};

/// Current difficulty state, stepped on score-threshold crossings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRamp {
    speed: f32,
    spawn_interval: f32,
    max_speed: f32,
    min_interval: f32,
    threshold: u32,
}

impl DifficultyRamp {
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            speed: config.initial_speed,
            spawn_interval: config.initial_spawn_interval,
            max_speed: config.max_speed,
            min_interval: config.min_spawn_interval,
            threshold: config.difficulty_threshold,
        }
    }

    /// Current downward obstacle speed (units/sec)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current delay between spawn waves (seconds)
    #[inline]
    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    /// Step the ramp once per threshold multiple the score change crossed.
    ///
    /// Crossings are counted by integer division on the totals, never by
    /// walking individual points, so a jump over a multiple (45 -> 55)
    /// still steps exactly once. Returns the number of steps applied.
    pub fn on_score_increase(&mut self, old_score: u32, new_score: u32) -> u32 {
        debug_assert!(new_score >= old_score);
        let crossings = new_score / self.threshold - old_score / self.threshold;
        for _ in 0..crossings {
            self.speed = (self.speed * SPEED_GROWTH_FACTOR).min(self.max_speed);
            self.spawn_interval = (self.spawn_interval * INTERVAL_DECAY_FACTOR).max(self.min_interval);
        }
        crossings
    }
}
