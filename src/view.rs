//! Read-only projection of a playing session.

use crate::error::{SessionError, SessionErrorKind};
use crate::session::{Session, SessionId, SessionStatus};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{instrument, warn};

/// Marker used in [`SessionView::board`] for unoccupied cells.
pub const EMPTY_MARKER: &str = "empty";

/// What a client sees of a session while it is being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionView {
    /// Session id.
    id: SessionId,
    /// Session status (always `Playing` for a projected view).
    status: SessionStatus,
    /// Cumulative score of the first participant.
    first_score: u32,
    /// Cumulative score of the second participant.
    second_score: u32,
    /// Winner's name, empty when there is none.
    winner: String,
    /// Whether the second participant is the scripted opponent.
    single_participant: bool,
    /// Name of the participant to move in the active round.
    turn_holder: String,
    /// Cell index to occupant name, or [`EMPTY_MARKER`].
    board: BTreeMap<usize, String>,
    /// When the session was created.
    created_at: DateTime<Utc>,
}

impl SessionView {
    /// Builds the view from a stored session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionErrorKind::NoActiveRound`] if the session is not playing.
    #[instrument(skip(session), fields(session_id = ?session.id(), status = %session.status()))]
    pub fn project(session: &Session) -> Result<Self, SessionError> {
        let id = session.require_id()?;
        let round = session.active_round().ok_or_else(|| {
            warn!("No active round to project");
            SessionError::new(SessionErrorKind::NoActiveRound(format!(
                "session {} is {}",
                id,
                session.status()
            )))
        })?;

        let board = round
            .board()
            .cells()
            .iter()
            .map(|cell| {
                let occupant = cell.square().occupant().unwrap_or(EMPTY_MARKER);
                (*cell.index(), occupant.to_string())
            })
            .collect();

        Ok(Self {
            id,
            status: *session.status(),
            first_score: *session.scores().first(),
            second_score: *session.scores().second(),
            winner: session.winner_name().unwrap_or_default().to_string(),
            single_participant: *session.single_participant(),
            turn_holder: round.turn_holder().clone(),
            board,
            created_at: *session.created_at(),
        })
    }

    /// Board indices still free in the active round.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.board
            .iter()
            .filter(|(_, occupant)| occupant.as_str() == EMPTY_MARKER)
            .map(|(index, _)| *index)
            .collect()
    }
}
