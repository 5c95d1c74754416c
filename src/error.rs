//! Library error type
//!
//! A correctly configured session never needs exceptional control flow; these
//! variants cover contract violations at the host boundary.

use thiserror::Error;

/// Errors surfaced to the host shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// Degenerate geometry or inverted tuning bounds at session creation.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A lane-change request named a lane that does not exist.
    #[error("lane {lane} out of range (lane count {lane_count})")]
    InvalidLane { lane: usize, lane_count: usize },

    /// The injected random source misbehaved (e.g. a scripted source ran dry).
    #[error("random source failure: {reason}")]
    RandomSource { reason: String },

    /// The score record store reported a persistence failure. Passed through
    /// to the host unmodified; the core does not retry.
    #[error("score record store failure: {reason}")]
    RecordStore { reason: String },
}

impl ArenaError {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        ArenaError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn random_source(reason: impl Into<String>) -> Self {
        ArenaError::RandomSource {
            reason: reason.into(),
        }
    }
}
