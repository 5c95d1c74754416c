//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-driven ticks only (no internal clocks)
//! - Injected RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod lanes;
pub mod obstacles;
pub mod rng;
pub mod session;
pub mod spawn;

pub use difficulty::DifficultyRamp;
pub use lanes::LaneLayout;
pub use obstacles::{Obstacle, ObstaclePool};
pub use rng::{RandomSource, ScriptedSource, SeededSource};
pub use session::{
    ArenaSession, ArenaSnapshot, GameEvent, Mode, ObstacleView, SessionStatus, TickResult,
};
pub use spawn::SpawnStrategy;
