//! A single round: one board plus its turn and scoring state.

use super::{Board, is_draw};
use crate::error::{SessionError, SessionErrorKind};
use crate::session::{Participants, Scores, Seat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Status of a round.
///
/// There is no drawn state: a drawn round is replayed in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum RoundStatus {
    /// Round is ongoing (or pristine).
    Playing,
    /// Round ended with a winner.
    Won,
}

/// What a single move did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The mover completed a line.
    Won(Seat),
    /// The board filled up without a line and was cleared for a replay.
    DrawReset,
    /// Play passes to the other participant.
    Continue,
}

/// One tic-tac-toe game within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Round {
    /// The board.
    board: Board,
    /// Round status.
    status: RoundStatus,
    /// Name of the participant allowed to move next.
    turn_holder: String,
    /// Who won the round, if anyone.
    winner: Option<Seat>,
    /// Per-round score pair.
    scores: Scores,
}

impl Round {
    /// Creates a pristine round with `first_mover` to play.
    pub fn new(first_mover: impl Into<String>) -> Self {
        Self {
            board: Board::new(),
            status: RoundStatus::Playing,
            turn_holder: first_mover.into(),
            winner: None,
            scores: Scores::default(),
        }
    }

    /// Checks if the round is still being played.
    pub fn is_playing(&self) -> bool {
        self.status == RoundStatus::Playing
    }

    /// Checks if the round is untouched: playing with an empty board and no score.
    pub fn is_pristine(&self) -> bool {
        self.is_playing()
            && self.board.occupied_count() == 0
            && self.winner.is_none()
            && self.scores == Scores::default()
    }

    /// Places `mover`'s mark at `index` and settles the consequences.
    ///
    /// A win credits the round score and freezes the round. A full board
    /// without a line resets the round in place with the first participant
    /// to move. Otherwise the turn passes to the other participant.
    ///
    /// # Errors
    ///
    /// - [`SessionErrorKind::NoActiveRound`] if the round is already won.
    /// - [`SessionErrorKind::IllegalMove`] if the cell is out of range or taken;
    ///   the round is unchanged in that case.
    #[track_caller]
    #[instrument(skip(self, participants), fields(turn_holder = %self.turn_holder))]
    pub fn apply_move(
        &mut self,
        mover: Seat,
        participants: &Participants,
        index: usize,
    ) -> Result<RoundOutcome, SessionError> {
        if !self.is_playing() {
            warn!(index, "Move attempted on a finished round");
            return Err(SessionError::new(SessionErrorKind::NoActiveRound(
                "round already has a winner".to_string(),
            )));
        }

        let name = participants.name(mover);
        self.board.occupy(index, name)?;
        debug!(index, player = %name, board = %self.board, "Cell occupied");

        if self.board.winner() == Some(name) {
            self.status = RoundStatus::Won;
            self.winner = Some(mover);
            self.scores.credit(mover);
            info!(winner = %name, line = ?self.board.winning_line(), "Round won");
            return Ok(RoundOutcome::Won(mover));
        }

        if is_draw(&self.board) {
            info!("Board full without a line, replaying round");
            self.reset(participants);
            return Ok(RoundOutcome::DrawReset);
        }

        self.turn_holder = participants.name(mover.other()).to_string();
        Ok(RoundOutcome::Continue)
    }

    /// Clears the round back to its pristine state.
    #[instrument(skip_all)]
    pub fn reset(&mut self, participants: &Participants) {
        self.board.clear();
        self.status = RoundStatus::Playing;
        self.turn_holder = participants.name(Seat::First).to_string();
        self.winner = None;
        self.scores = Scores::default();
    }
}
