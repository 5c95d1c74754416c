//! Arena configuration - validated, data-driven session tuning.
//!
//! `ArenaConfig::new` fills every knob from `consts`; hosts override fields
//! before handing the config to `ArenaSession::new`, which validates it.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ArenaError;
use crate::sim::Mode;

/// Geometry and tuning for one session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Game mode (spawn behavior + record namespace)
    pub mode: Mode,
    /// Arena width in world units
    pub arena_width: f32,
    /// Arena height in world units
    pub arena_height: f32,
    /// Number of lanes dividing the arena width
    pub lane_count: usize,
    /// Starting obstacle descent speed (units/sec)
    pub initial_speed: f32,
    /// Descent speed ceiling
    pub max_speed: f32,
    /// Starting delay between spawn waves (seconds)
    pub initial_spawn_interval: f32,
    /// Spawn delay floor
    pub min_spawn_interval: f32,
    /// Points per dodged obstacle
    pub points_per_evasion: u32,
    /// Score multiple at which the difficulty ramp steps
    pub difficulty_threshold: u32,
    /// Vertical band for same-lane collision contact
    pub collision_tolerance: f32,
}

impl ArenaConfig {
    /// Config for `mode` with default tuning.
    pub fn new(mode: Mode, arena_width: f32, arena_height: f32) -> Self {
        Self {
            mode,
            arena_width,
            arena_height,
            lane_count: LANE_COUNT,
            initial_speed: INITIAL_DESCENT_SPEED,
            max_speed: MAX_DESCENT_SPEED,
            initial_spawn_interval: INITIAL_SPAWN_INTERVAL,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            points_per_evasion: POINTS_PER_EVASION,
            difficulty_threshold: DIFFICULTY_THRESHOLD,
            collision_tolerance: COLLISION_TOLERANCE,
        }
    }

    /// Reject degenerate geometry and inverted tuning bounds.
    pub fn validate(&self) -> Result<(), ArenaError> {
        // Negated comparisons also catch NaN.
        if !(self.arena_width > 0.0) {
            return Err(ArenaError::invalid_configuration(
                "arena width must be positive",
            ));
        }
        if !(self.arena_height > 0.0) {
            return Err(ArenaError::invalid_configuration(
                "arena height must be positive",
            ));
        }
        if self.lane_count == 0 {
            return Err(ArenaError::invalid_configuration(
                "lane count must be non-zero",
            ));
        }
        if !(self.initial_speed > 0.0) {
            return Err(ArenaError::invalid_configuration(
                "initial speed must be positive",
            ));
        }
        if !(self.max_speed >= self.initial_speed) {
            return Err(ArenaError::invalid_configuration(
                "max speed must not be below initial speed",
            ));
        }
        if !(self.min_spawn_interval > 0.0) {
            return Err(ArenaError::invalid_configuration(
                "minimum spawn interval must be positive",
            ));
        }
        if !(self.initial_spawn_interval >= self.min_spawn_interval) {
            return Err(ArenaError::invalid_configuration(
                "initial spawn interval must not be below the minimum",
            ));
        }
        if self.difficulty_threshold == 0 {
            return Err(ArenaError::invalid_configuration(
                "difficulty threshold must be non-zero",
            ));
        }
        if !(self.collision_tolerance >= 0.0) {
            return Err(ArenaError::invalid_configuration(
                "collision tolerance must not be negative",
            ));
        }
        Ok(())
    }
}
