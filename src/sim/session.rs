//! Arena session - one play-through as a state machine.
//!
//! Owns the protagonist, score, timers, and the obstacle pool, and
//! orchestrates lane layout, spawn strategy, and difficulty ramp each tick.
//! The host drives it with elapsed-time ticks and lane-change requests,
//! renders from `snapshot`, and drains emitted events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ArenaConfig;
use crate::consts::{OBSTACLE_SIZE, PROTAGONIST_Y};
use crate::error::ArenaError;
use crate::highscores::ScoreRecordStore;

use super::difficulty::DifficultyRamp;
use super::lanes::LaneLayout;
use super::obstacles::ObstaclePool;
use super::rng::RandomSource;
use super::spawn::SpawnStrategy;

/// Game mode - selects the spawn strategy and the record namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Obstacles fall in synchronized waves of 2-4 lanes
    Synchronized,
    /// Obstacles fall at random intervals, mostly one lane at a time
    Stochastic,
}

impl Mode {
    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Synchronized => "Normal Mode",
            Mode::Stochastic => "Random Mode",
        }
    }

    /// Storage key for the mode's best score
    pub fn best_key(&self) -> &'static str {
        match self {
            Mode::Synchronized => "lane_rush_best_normal",
            Mode::Stochastic => "lane_rush_best_random",
        }
    }

    /// Storage key for the mode's leaderboard
    pub fn leaderboard_key(&self) -> &'static str {
        match self {
            Mode::Synchronized => "lane_rush_leaderboard_normal",
            Mode::Stochastic => "lane_rush_leaderboard_random",
        }
    }
}

/// Lifecycle of a session. `Ended` is terminal; a new play-through is a
/// fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Active,
    Suspended,
    Ended,
}

/// Events emitted toward the host shell, drained after ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged { new_score: u32 },
    SessionEnded { final_score: u32, is_new_record: bool },
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickResult {
    /// Points awarded this tick (a multiple of the per-evasion reward)
    pub score_delta: u32,
    /// True when a collision ended the session this tick
    pub terminated: bool,
}

/// One obstacle as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub lane: usize,
    pub y: f32,
    /// World-space position (lane center x, vertical coordinate)
    pub position: Vec2,
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub mode: Mode,
    pub status: SessionStatus,
    pub score: u32,
    pub best_score: u32,
    pub wave_count: u32,
    pub protagonist_lane: usize,
    pub protagonist_position: Vec2,
    pub obstacles: Vec<ObstacleView>,
}

/// One play-through from creation to collision.
///
/// Single-threaded cooperative model: one logical tick advances the whole
/// simulation, and callers must not tick concurrently.
pub struct ArenaSession {
    config: ArenaConfig,
    layout: LaneLayout,
    pool: ObstaclePool,
    strategy: SpawnStrategy,
    ramp: DifficultyRamp,
    status: SessionStatus,
    protagonist_lane: usize,
    score: u32,
    best_score: u32,
    wave_count: u32,
    rng: Box<dyn RandomSource>,
    store: Box<dyn ScoreRecordStore>,
    pending_events: Vec<GameEvent>,
}

impl ArenaSession {
    /// Create a session for `mode` with default tuning.
    pub fn create(
        mode: Mode,
        arena_width: f32,
        arena_height: f32,
        rng: Box<dyn RandomSource>,
        store: Box<dyn ScoreRecordStore>,
    ) -> Result<Self, ArenaError> {
        Self::new(ArenaConfig::new(mode, arena_width, arena_height), rng, store)
    }

    /// Create a session from a full config. Validates the config, draws the
    /// stochastic variant's first delay, and reads the mode's best score.
    pub fn new(
        config: ArenaConfig,
        mut rng: Box<dyn RandomSource>,
        store: Box<dyn ScoreRecordStore>,
    ) -> Result<Self, ArenaError> {
        config.validate()?;
        let layout = LaneLayout::new(config.arena_width, config.lane_count)?;
        let strategy =
            SpawnStrategy::for_mode(config.mode, config.initial_spawn_interval, rng.as_mut())?;
        let ramp = DifficultyRamp::new(&config);
        let best_score = store.get_best(config.mode)?;

        log::info!(
            "session created: {} ({}x{}, {} lanes)",
            config.mode.label(),
            config.arena_width,
            config.arena_height,
            config.lane_count
        );

        Ok(Self {
            protagonist_lane: config.lane_count / 2,
            config,
            layout,
            pool: ObstaclePool::new(),
            strategy,
            ramp,
            status: SessionStatus::Active,
            score: 0,
            best_score,
            wave_count: 0,
            rng,
            store,
            pending_events: Vec::new(),
        })
    }

    /// Advance the simulation by `dt` seconds of unsuspended time.
    ///
    /// No-op unless Active, so the host's clock must exclude time spent
    /// suspended. Spawns due waves, descends and reaps obstacles, scores
    /// dodges, ramps difficulty, and checks the protagonist's lane for
    /// contact - which ends the session and finalizes score records.
    pub fn tick(&mut self, dt: f32) -> Result<TickResult, ArenaError> {
        if self.status != SessionStatus::Active {
            return Ok(TickResult::default());
        }

        let lanes = self.strategy.poll(
            dt,
            self.ramp.spawn_interval(),
            self.layout.lane_count(),
            self.rng.as_mut(),
        )?;
        if !lanes.is_empty() {
            let spawn_y = self.config.arena_height + OBSTACLE_SIZE;
            for &lane in &lanes {
                self.pool.spawn(lane, spawn_y);
            }
            self.wave_count += 1;
            log::debug!("wave {}: lanes {lanes:?}", self.wave_count);
        }

        self.pool.advance(dt, self.ramp.speed());

        let reaped = self.pool.reap_below(-OBSTACLE_SIZE);
        let score_delta = reaped as u32 * self.config.points_per_evasion;
        if score_delta > 0 {
            let old_score = self.score;
            self.score += score_delta;
            self.pending_events.push(GameEvent::ScoreChanged {
                new_score: self.score,
            });
            if self.ramp.on_score_increase(old_score, self.score) > 0 {
                log::debug!(
                    "difficulty step at {}: speed {:.1}, interval {:.2}",
                    self.score,
                    self.ramp.speed(),
                    self.ramp.spawn_interval()
                );
            }
        }

        // Obstacles are never destroyed by contact; contact ends the run.
        if self.pool.collides_with_lane(
            self.protagonist_lane,
            PROTAGONIST_Y,
            self.config.collision_tolerance,
        ) {
            self.finish()?;
            return Ok(TickResult {
                score_delta,
                terminated: true,
            });
        }

        Ok(TickResult {
            score_delta,
            terminated: false,
        })
    }

    /// Move the protagonist, instantaneous from the simulation's view.
    ///
    /// Out-of-range lanes are an error; otherwise the request is ignored
    /// unless the session is Active.
    pub fn request_lane_change(&mut self, lane: usize) -> Result<(), ArenaError> {
        if lane >= self.layout.lane_count() {
            return Err(ArenaError::InvalidLane {
                lane,
                lane_count: self.layout.lane_count(),
            });
        }
        if self.status == SessionStatus::Active {
            self.protagonist_lane = lane;
        }
        Ok(())
    }

    /// Suspend the session. Only Active sessions suspend; obstacle state is
    /// untouched and resumes exactly where it was.
    pub fn suspend(&mut self) {
        if self.status == SessionStatus::Active {
            self.status = SessionStatus::Suspended;
            log::debug!("session suspended at score {}", self.score);
        }
    }

    /// Resume a suspended session.
    pub fn resume(&mut self) {
        if self.status == SessionStatus::Suspended {
            self.status = SessionStatus::Active;
            log::debug!("session resumed");
        }
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot {
            mode: self.config.mode,
            status: self.status,
            score: self.score,
            best_score: self.best_score,
            wave_count: self.wave_count,
            protagonist_lane: self.protagonist_lane,
            protagonist_position: Vec2::new(
                self.layout.lane_center(self.protagonist_lane),
                PROTAGONIST_Y,
            ),
            obstacles: self
                .pool
                .iter()
                .map(|o| ObstacleView {
                    lane: o.lane,
                    y: o.y,
                    position: Vec2::new(self.layout.lane_center(o.lane), o.y),
                })
                .collect(),
        }
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn wave_count(&self) -> u32 {
        self.wave_count
    }

    pub fn protagonist_lane(&self) -> usize {
        self.protagonist_lane
    }

    /// Terminal transition: record the run and notify the host.
    ///
    /// Store failures propagate unmodified; the session is already Ended
    /// when they surface.
    fn finish(&mut self) -> Result<(), ArenaError> {
        self.status = SessionStatus::Ended;

        let mode = self.config.mode;
        let is_new_record = self.score > self.best_score;
        if is_new_record {
            self.best_score = self.score;
            self.store.set_best(mode, self.score)?;
        }
        self.store.append_score(mode, self.score)?;

        log::info!(
            "session ended: {} score {}{}",
            mode.label(),
            self.score,
            if is_new_record { " (new record)" } else { "" }
        );
        self.pending_events.push(GameEvent::SessionEnded {
            final_score: self.score,
            is_new_record,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::ScoreBoard;
    use crate::sim::rng::{ScriptedSource, SeededSource};

    fn synchronized_session(rng: Box<dyn RandomSource>) -> ArenaSession {
        ArenaSession::create(
            Mode::Synchronized,
            500.0,
            800.0,
            rng,
            Box::new(ScoreBoard::new()),
        )
        .unwrap()
    }

    /// Store that accepts reads but fails every write.
    struct ReadOnlyStore;

    impl ScoreRecordStore for ReadOnlyStore {
        fn get_best(&self, _mode: Mode) -> Result<u32, ArenaError> {
            Ok(0)
        }
        fn set_best(&mut self, _mode: Mode, _value: u32) -> Result<(), ArenaError> {
            Err(ArenaError::RecordStore {
                reason: "read-only".into(),
            })
        }
        fn get_top10(&self, _mode: Mode) -> Result<Vec<u32>, ArenaError> {
            Ok(Vec::new())
        }
        fn append_score(&mut self, _mode: Mode, _value: u32) -> Result<(), ArenaError> {
            Err(ArenaError::RecordStore {
                reason: "read-only".into(),
            })
        }
    }

    /// Store whose reads fail too.
    struct BrokenStore;

    impl ScoreRecordStore for BrokenStore {
        fn get_best(&self, _mode: Mode) -> Result<u32, ArenaError> {
            Err(ArenaError::RecordStore {
                reason: "backing store unavailable".into(),
            })
        }
        fn set_best(&mut self, _mode: Mode, _value: u32) -> Result<(), ArenaError> {
            unreachable!()
        }
        fn get_top10(&self, _mode: Mode) -> Result<Vec<u32>, ArenaError> {
            unreachable!()
        }
        fn append_score(&mut self, _mode: Mode, _value: u32) -> Result<(), ArenaError> {
            unreachable!()
        }
    }

    #[test]
    fn test_first_synchronized_wave_end_to_end() {
        let mut session = synchronized_session(Box::new(SeededSource::new(42)));

        // One tick past the initial spawn interval
        let result = session.tick(2.0).unwrap();
        assert!(!result.terminated);

        let snapshot = session.snapshot();
        assert!((2..=4).contains(&snapshot.obstacles.len()));
        assert_eq!(snapshot.wave_count, 1);

        let mut lanes: Vec<usize> = snapshot.obstacles.iter().map(|o| o.lane).collect();
        lanes.sort_unstable();
        lanes.dedup();
        assert_eq!(lanes.len(), snapshot.obstacles.len(), "duplicate lanes");
        assert!(lanes.iter().all(|&lane| lane < 5));

        // Spawned above the arena top (800 + 55), then descended 200 * 2.0
        for obstacle in &snapshot.obstacles {
            assert_eq!(obstacle.y, 455.0);
            assert_eq!(obstacle.position.x, obstacle.lane as f32 * 100.0 + 50.0);
        }
    }

    #[test]
    fn test_full_run_scores_then_collides() {
        // Wave lanes: {0,1}, {3,4}, {2,0}, {0,1}. The protagonist holds the
        // middle lane, dodges the first two waves, and the third hits.
        let rng = ScriptedSource::new(&[2, 0, 0, 2, 3, 3, 2, 2, 0, 2, 0, 0], &[]);
        let mut session = synchronized_session(Box::new(rng));

        let mut deltas = Vec::new();
        for _ in 0..4 {
            let result = session.tick(1.8).unwrap();
            assert!(!result.terminated);
            deltas.push(result.score_delta);
        }

        // Wave three is now 75 units above the protagonist; 0.4s closes the
        // gap into the collision band.
        let result = session.tick(0.4).unwrap();
        assert!(result.terminated);
        assert_eq!(result.score_delta, 0);

        assert_eq!(deltas, vec![0, 0, 20, 20]);
        assert_eq!(session.score(), 40);
        assert_eq!(session.status(), SessionStatus::Ended);

        assert_eq!(
            session.drain_events(),
            vec![
                GameEvent::ScoreChanged { new_score: 20 },
                GameEvent::ScoreChanged { new_score: 40 },
                GameEvent::SessionEnded {
                    final_score: 40,
                    is_new_record: true
                },
            ]
        );
        // Drained
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_ended_session_is_terminal() {
        let rng = ScriptedSource::new(&[2, 2, 0], &[]);
        let store = Box::new(ScoreBoard::new());
        let mut config = ArenaConfig::new(Mode::Synchronized, 500.0, 800.0);
        config.initial_speed = 400.0;
        let mut session = ArenaSession::new(config, Box::new(rng), store).unwrap();

        // Wave lands straight in the collision band: 855 - 400 * 2 = 55
        let result = session.tick(2.0).unwrap();
        assert!(result.terminated);
        assert_eq!(session.status(), SessionStatus::Ended);

        let before = session.snapshot();

        // Everything is a no-op now; no randomness is consumed either, the
        // scripted source would error if a wave were polled.
        assert_eq!(session.tick(10.0).unwrap(), TickResult::default());
        session.request_lane_change(0).unwrap();
        session.suspend();
        session.resume();

        assert_eq!(session.status(), SessionStatus::Ended);
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_suspension_does_not_advance_time() {
        let mut suspended = synchronized_session(Box::new(SeededSource::new(9)));
        let mut control = synchronized_session(Box::new(SeededSource::new(9)));

        suspended.tick(1.0).unwrap();
        control.tick(1.0).unwrap();

        suspended.suspend();
        assert_eq!(suspended.status(), SessionStatus::Suspended);
        // Ticks while suspended change nothing
        assert_eq!(suspended.tick(0.5).unwrap(), TickResult::default());
        assert_eq!(suspended.tick(3.0).unwrap(), TickResult::default());
        suspended.resume();

        suspended.tick(0.9).unwrap();
        control.tick(0.9).unwrap();

        assert_eq!(suspended.snapshot(), control.snapshot());
    }

    #[test]
    fn test_suspend_resume_only_toggle_from_active() {
        let mut session = synchronized_session(Box::new(SeededSource::new(1)));

        // Resume from Active: no-op
        session.resume();
        assert_eq!(session.status(), SessionStatus::Active);

        session.suspend();
        assert_eq!(session.status(), SessionStatus::Suspended);
        // Suspend again: no-op
        session.suspend();
        assert_eq!(session.status(), SessionStatus::Suspended);

        session.resume();
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn test_lane_change_applies_only_while_active() {
        let mut session = synchronized_session(Box::new(SeededSource::new(1)));
        assert_eq!(session.protagonist_lane(), 2);

        session.request_lane_change(4).unwrap();
        assert_eq!(session.protagonist_lane(), 4);

        session.suspend();
        session.request_lane_change(0).unwrap();
        assert_eq!(session.protagonist_lane(), 4);
    }

    #[test]
    fn test_out_of_range_lane_rejected() {
        let mut session = synchronized_session(Box::new(SeededSource::new(1)));

        assert_eq!(
            session.request_lane_change(5),
            Err(ArenaError::InvalidLane {
                lane: 5,
                lane_count: 5
            })
        );
        assert_eq!(session.protagonist_lane(), 2);
    }

    #[test]
    fn test_invalid_geometry_rejected_at_creation() {
        let result = ArenaSession::create(
            Mode::Synchronized,
            -1.0,
            800.0,
            Box::new(SeededSource::new(1)),
            Box::new(ScoreBoard::new()),
        );
        assert!(matches!(
            result,
            Err(ArenaError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_store_read_failure_surfaces_at_creation() {
        let result = ArenaSession::create(
            Mode::Synchronized,
            500.0,
            800.0,
            Box::new(SeededSource::new(1)),
            Box::new(BrokenStore),
        );
        assert!(matches!(result, Err(ArenaError::RecordStore { .. })));
    }

    #[test]
    fn test_store_write_failure_surfaces_at_termination() {
        let rng = ScriptedSource::new(&[2, 2, 0], &[]);
        let mut config = ArenaConfig::new(Mode::Synchronized, 500.0, 800.0);
        config.initial_speed = 400.0;
        let mut session =
            ArenaSession::new(config, Box::new(rng), Box::new(ReadOnlyStore)).unwrap();

        // The colliding tick hits the store, whose failure passes through.
        assert!(matches!(
            session.tick(2.0),
            Err(ArenaError::RecordStore { .. })
        ));
        assert_eq!(session.status(), SessionStatus::Ended);
    }

    #[test]
    fn test_stochastic_wave_can_end_session() {
        let mut config = ArenaConfig::new(Mode::Stochastic, 500.0, 800.0);
        config.initial_speed = 400.0;
        // Floats: first delay 1.0s, count draw 0.4 (one obstacle), redraw
        // 0.9s. Int: lane index 2, the protagonist's lane.
        let rng = ScriptedSource::new(&[2], &[1.0, 0.4, 0.9]);
        let mut session =
            ArenaSession::new(config, Box::new(rng), Box::new(ScoreBoard::new())).unwrap();

        let result = session.tick(2.0).unwrap();
        assert!(result.terminated);
        assert_eq!(
            session.drain_events().last(),
            Some(&GameEvent::SessionEnded {
                final_score: 0,
                is_new_record: false
            })
        );
    }

    #[test]
    fn test_score_conservation_over_long_run() {
        let mut session = synchronized_session(Box::new(SeededSource::new(123)));

        let mut total = 0;
        for _ in 0..200 {
            let result = session.tick(0.25).unwrap();
            assert_eq!(result.score_delta % 10, 0);
            total += result.score_delta;

            let snapshot = session.snapshot();
            assert_eq!(snapshot.score, total);
            assert!(snapshot.obstacles.iter().all(|o| o.lane < 5));
        }
    }

    #[test]
    fn test_snapshot_world_positions() {
        let session = synchronized_session(Box::new(SeededSource::new(7)));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.protagonist_lane, 2);
        assert_eq!(snapshot.protagonist_position, Vec2::new(250.0, 60.0));
        assert_eq!(snapshot.best_score, 0);
        assert!(snapshot.obstacles.is_empty());
    }

    #[test]
    fn test_mode_labels_and_keys() {
        assert_eq!(Mode::Synchronized.label(), "Normal Mode");
        assert_eq!(Mode::Stochastic.label(), "Random Mode");
        assert_ne!(Mode::Synchronized.best_key(), Mode::Stochastic.best_key());
        assert_ne!(
            Mode::Synchronized.leaderboard_key(),
            Mode::Stochastic.leaderboard_key()
        );
    }
}
