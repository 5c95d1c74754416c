//! Obstacle pool - the live set of descending obstacles.
//!
//! Obstacles are owned exclusively by the pool. They leave it one way only:
//! crossing the departure threshold below the arena (a successful dodge).
//! Contact with the protagonist ends the session instead of destroying the
//! obstacle, so the pool never removes on collision.

use serde::{Deserialize, Serialize};

/// A falling obstacle occupying one lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: usize,
    pub y: f32,
}

/// Growable collection of active obstacles.
///
/// Iteration order is insertion order, which keeps removal stable within a
/// tick. Ids are unique for the lifetime of the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a new obstacle at the given lane and vertical start.
    pub fn spawn(&mut self, lane: usize, y: f32) -> u32 {
        let id = self.next_obstacle_id();
        self.obstacles.push(Obstacle { id, lane, y });
        id
    }

    /// Translate every obstacle downward by `speed * dt`.
    pub fn advance(&mut self, dt: f32, speed: f32) {
        let movement = speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.y -= movement;
        }
    }

    /// Remove obstacles below `threshold`, returning how many were dodged.
    pub fn reap_below(&mut self, threshold: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.y >= threshold);
        before - self.obstacles.len()
    }

    /// True if any live obstacle shares the lane within the vertical band.
    pub fn collides_with_lane(&self, lane: usize, protagonist_y: f32, tolerance: f32) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.lane == lane && (o.y - protagonist_y).abs() <= tolerance)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
}

impl Default for ObstaclePool {
    fn default() -> Self {
        Self::new()
    }
}
