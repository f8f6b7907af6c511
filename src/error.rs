//! Error types for session operations.

use crate::session::SessionId;
use derive_more::{Display, Error};
use tracing::instrument;

/// Why a cell could not be occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum IllegalMoveReason {
    /// Index outside 0..9.
    #[display("index out of range (must be 0-8)")]
    OutOfRange,
    /// The cell already has an occupant.
    #[display("cell is already occupied")]
    Occupied,
}

/// Category of a session failure.
///
/// None of these are retried inside the engine; callers decide whether to resubmit.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionErrorKind {
    /// Bad session creation parameters.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// Unknown session id.
    #[display("Session {} not found", _0)]
    NotFound(SessionId),

    /// The operation needs a playing round and there is none.
    #[display("No active round: {}", _0)]
    NoActiveRound(String),

    /// The requested cell cannot be taken.
    #[display("Illegal move at cell {index}: {reason}")]
    IllegalMove {
        /// Requested cell index.
        index: usize,
        /// Why it was rejected.
        reason: IllegalMoveReason,
    },

    /// The opponent policy was asked to move on a full board.
    #[display("Opponent has no legal move")]
    NoLegalMove,

    /// The session is voided and cannot be revived.
    #[display("Session {} is voided", _0)]
    SessionVoided(SessionId),

    /// A session invariant failed after a mutation; nothing was persisted.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

/// Session error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct SessionError {
    /// What went wrong.
    pub kind: SessionErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: SessionErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> &SessionErrorKind {
        &self.kind
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
