//! Lane Rush - a lane-dodge arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, descent, collisions, session state)
//! - `config`: Validated arena configuration
//! - `highscores`: Best-score and top-10 record keeping per game mode
//! - `error`: Library error type
//!
//! The crate is renderer-agnostic. A host shell feeds `ArenaSession::tick`
//! with elapsed time and lane-change requests, reads `ArenaSession::snapshot`
//! to draw, and drains emitted events for score display and game-over flow.

pub mod config;
pub mod error;
pub mod highscores;
pub mod sim;

pub use config::ArenaConfig;
pub use error::ArenaError;
pub use highscores::{ScoreBoard, ScoreRecord, ScoreRecordStore};
pub use sim::{
    ArenaSession, ArenaSnapshot, GameEvent, Mode, RandomSource, SeededSource, SessionStatus,
    TickResult,
};

/// Game configuration constants
pub mod consts {
    /// Number of lanes in the arena
    pub const LANE_COUNT: usize = 5;

    /// Protagonist sprite size (world units)
    pub const PROTAGONIST_SIZE: f32 = 60.0;
    /// Obstacle sprite size (world units)
    pub const OBSTACLE_SIZE: f32 = 55.0;

    /// Initial downward obstacle speed (units/sec)
    pub const INITIAL_DESCENT_SPEED: f32 = 200.0;
    /// Obstacle speed ceiling after difficulty ramping
    pub const MAX_DESCENT_SPEED: f32 = 500.0;
    /// Multiplicative speed step per difficulty increase
    pub const SPEED_GROWTH_FACTOR: f32 = 1.05;

    /// Initial delay between spawn waves (seconds)
    pub const INITIAL_SPAWN_INTERVAL: f32 = 1.8;
    /// Spawn interval floor
    pub const MIN_SPAWN_INTERVAL: f32 = 0.6;
    /// Multiplicative interval step per difficulty increase
    pub const INTERVAL_DECAY_FACTOR: f32 = 0.95;

    /// Points awarded per dodged obstacle
    pub const POINTS_PER_EVASION: u32 = 10;
    /// Score multiple at which the difficulty ramp steps
    pub const DIFFICULTY_THRESHOLD: u32 = 50;

    /// Protagonist resting height above the arena floor
    pub const PROTAGONIST_Y: f32 = 60.0;

    /// Collision circle radius of the protagonist (tighter than the sprite)
    pub const PROTAGONIST_RADIUS: f32 = PROTAGONIST_SIZE / 2.0 - 5.0;
    /// Collision circle radius of an obstacle (tighter than the sprite)
    pub const OBSTACLE_RADIUS: f32 = OBSTACLE_SIZE / 2.0 - 8.0;
    /// Vertical band within which a same-lane obstacle contacts the protagonist
    pub const COLLISION_TOLERANCE: f32 = PROTAGONIST_RADIUS + OBSTACLE_RADIUS;

    /// Shortest possible delay between stochastic spawn events (seconds)
    pub const CHAOS_MIN_DELAY: f32 = 0.3;
}
