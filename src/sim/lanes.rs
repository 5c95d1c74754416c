//! Lane geometry - fixed vertical corridors across the arena width.
//!
//! Pure and stateless: lane index to center x, and x back to lane index.

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Evenly divides the arena width into `lane_count` corridors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    arena_width: f32,
    lane_count: usize,
}

impl LaneLayout {
    pub fn new(arena_width: f32, lane_count: usize) -> Result<Self, ArenaError> {
        if !(arena_width > 0.0) {
            return Err(ArenaError::invalid_configuration(
                "arena width must be positive",
            ));
        }
        if lane_count == 0 {
            return Err(ArenaError::invalid_configuration(
                "lane count must be non-zero",
            ));
        }
        Ok(Self {
            arena_width,
            lane_count,
        })
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Width of a single corridor
    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.arena_width / self.lane_count as f32
    }

    /// X coordinate of a lane's center line
    pub fn lane_center(&self, lane: usize) -> f32 {
        debug_assert!(lane < self.lane_count);
        self.lane_width() * lane as f32 + self.lane_width() / 2.0
    }

    /// Lane containing the horizontal coordinate, if inside the arena
    pub fn lane_at(&self, x: f32) -> Option<usize> {
        if !(0.0..self.arena_width).contains(&x) {
            return None;
        }
        // Float division can land exactly on the right edge of the last lane.
        Some(((x / self.lane_width()) as usize).min(self.lane_count - 1))
    }
}
