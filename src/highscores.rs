//! Best-score and top-10 record keeping per game mode.
//!
//! The core touches records exactly once per session, at termination. Hosts
//! own actual persistence: either implement `ScoreRecordStore` over their
//! storage directly, or keep a `ScoreBoard` in memory and round-trip it as
//! JSON. A host exposing the store to a concurrent reader (a leaderboard
//! view) must make each update atomic; the core itself is single-threaded.

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;
use crate::sim::Mode;

/// Maximum number of leaderboard entries kept per mode
pub const MAX_RECORD_ENTRIES: usize = 10;

/// Record state for one mode: best score plus the top-10 list, descending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub best: u32,
    pub top10: Vec<u32>,
}

impl ScoreRecord {
    /// Insert a score, keeping the list sorted descending and capped.
    /// Duplicate values are preserved.
    fn append(&mut self, value: u32) {
        self.top10.push(value);
        self.top10.sort_unstable_by(|a, b| b.cmp(a));
        self.top10.truncate(MAX_RECORD_ENTRIES);
    }
}

/// Host-facing persistence contract, one record namespace per mode.
///
/// Failures surface to the caller unmodified; the core never retries or
/// swallows them.
pub trait ScoreRecordStore {
    fn get_best(&self, mode: Mode) -> Result<u32, ArenaError>;
    fn set_best(&mut self, mode: Mode, value: u32) -> Result<(), ArenaError>;
    fn get_top10(&self, mode: Mode) -> Result<Vec<u32>, ArenaError>;
    fn append_score(&mut self, mode: Mode, value: u32) -> Result<(), ArenaError>;
}

/// In-memory score board, serializable for hosts that persist JSON strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    synchronized: ScoreRecord,
    stochastic: ScoreRecord,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, mode: Mode) -> &ScoreRecord {
        match mode {
            Mode::Synchronized => &self.synchronized,
            Mode::Stochastic => &self.stochastic,
        }
    }

    fn record_mut(&mut self, mode: Mode) -> &mut ScoreRecord {
        match mode {
            Mode::Synchronized => &mut self.synchronized,
            Mode::Stochastic => &mut self.stochastic,
        }
    }

    /// Serialize for host persistence (keyed by `Mode::best_key` /
    /// `Mode::leaderboard_key` namespaces when stored piecemeal).
    pub fn to_json(&self) -> Result<String, ArenaError> {
        serde_json::to_string(self).map_err(|e| ArenaError::RecordStore {
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        serde_json::from_str(json).map_err(|e| ArenaError::RecordStore {
            reason: e.to_string(),
        })
    }
}

impl ScoreRecordStore for ScoreBoard {
    fn get_best(&self, mode: Mode) -> Result<u32, ArenaError> {
        Ok(self.record(mode).best)
    }

    fn set_best(&mut self, mode: Mode, value: u32) -> Result<(), ArenaError> {
        self.record_mut(mode).best = value;
        log::info!("{}: new best score {value}", mode.label());
        Ok(())
    }

    fn get_top10(&self, mode: Mode) -> Result<Vec<u32>, ArenaError> {
        Ok(self.record(mode).top10.clone())
    }

    fn append_score(&mut self, mode: Mode, value: u32) -> Result<(), ArenaError> {
        self.record_mut(mode).append(value);
        Ok(())
    }
}
