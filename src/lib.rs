//! Strictly Rounds library - multi-round tic-tac-toe sessions
//!
//! Two participants, or one participant against a scripted opponent, play a
//! configured number of rounds. The engine tracks every board, the turn
//! order and the scores, and settles the session once every round is won.
//!
//! # Architecture
//!
//! - **Games**: board, win/draw rules and the round state machine
//! - **Session**: participants, rounds and cumulative scores
//! - **Engine**: create, move, restart, void and view operations
//! - **Opponent**: pluggable move selection for the scripted opponent
//! - **Store / Registry**: collaborators for persistence and identities
//!
//! # Example
//!
//! ```
//! use strictly_rounds::{EngineConfig, SessionEngine, SessionStatus};
//!
//! # fn example() -> Result<(), strictly_rounds::SessionError> {
//! let engine = SessionEngine::in_memory(EngineConfig::default());
//! let session = engine.create_session(false, "Ana", "Beto", 1)?;
//! let id = session.id().expect("saved sessions have an id");
//!
//! for cell in [0, 3, 1, 4, 2] {
//!     engine.make_move(id, cell)?;
//! }
//!
//! let session = engine.session(id)?;
//! assert_eq!(*session.status(), SessionStatus::Completed);
//! assert_eq!(session.winner_name(), Some("Ana"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod error;
mod games;
mod invariants;
mod opponent;
mod registry;
mod session;
mod store;
mod view;

// Crate-level exports - Configuration
pub use config::{DEFAULT_OPPONENT_NAME, EngineConfig};

// Crate-level exports - Engine
pub use engine::SessionEngine;

// Crate-level exports - Errors
pub use error::{ConfigError, IllegalMoveReason, SessionError, SessionErrorKind};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, CELL_COUNT, Cell, LINES, Round, RoundOutcome, RoundStatus, Square, check_winner, is_draw,
    is_full, winning_line,
};

// Crate-level exports - Invariants
pub use invariants::{
    ActiveRoundInvariant, CompletionInvariant, Invariant, InvariantSet, InvariantViolation,
    ScoreLedgerInvariant, SessionInvariants, SingleWinnerInvariant,
};

// Crate-level exports - Opponent policies
pub use opponent::{FirstAvailable, OpponentKind, OpponentPolicy, RandomOpponent};

// Crate-level exports - Collaborators
pub use registry::{InMemoryParticipantRegistry, ParticipantRegistry};
pub use store::{InMemorySessionStore, SessionStore};

// Crate-level exports - Session management
pub use session::{
    Participant, ParticipantId, Participants, Scores, Seat, Session, SessionId, SessionStatus,
};
pub use view::{EMPTY_MARKER, SessionView};
