//! Session aggregate: participants, rounds, and cumulative scores.

use crate::error::{SessionError, SessionErrorKind};
use crate::games::tictactoe::{Round, RoundStatus};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Unique identifier for a session, assigned by the store on first save.
pub type SessionId = u64;

/// Unique identifier for a participant, assigned by the registry.
pub type ParticipantId = u64;

/// A named participant in a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct Participant {
    /// Registry-assigned id.
    id: ParticipantId,
    /// Display name; also the mark written on the board.
    name: String,
}

/// Which of the two participant slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    /// First participant (always opens a round).
    First,
    /// Second participant (the scripted opponent in single-participant mode).
    Second,
}

impl Seat {
    /// Returns the other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// The two participants of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Participants {
    /// First participant.
    first: Participant,
    /// Second participant.
    second: Participant,
}

impl Participants {
    /// Returns the participant in `seat`.
    pub fn get(&self, seat: Seat) -> &Participant {
        match seat {
            Seat::First => &self.first,
            Seat::Second => &self.second,
        }
    }

    /// Returns the name of the participant in `seat`.
    pub fn name(&self, seat: Seat) -> &str {
        self.get(seat).name()
    }

    /// Resolves a name to its seat, checking the first participant first.
    pub fn seat_of(&self, name: &str) -> Option<Seat> {
        if self.first.name == name {
            Some(Seat::First)
        } else if self.second.name == name {
            Some(Seat::Second)
        } else {
            None
        }
    }
}

/// A pair of scores, one per seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct Scores {
    /// Score of the first participant.
    first: u32,
    /// Score of the second participant.
    second: u32,
}

impl Scores {
    /// Returns the score for `seat`.
    pub fn of(&self, seat: Seat) -> u32 {
        match seat {
            Seat::First => self.first,
            Seat::Second => self.second,
        }
    }

    /// Adds one point to `seat`.
    pub fn credit(&mut self, seat: Seat) {
        match seat {
            Seat::First => self.first += 1,
            Seat::Second => self.second += 1,
        }
    }

    /// Returns the seat with the strictly higher score, `None` on a tie.
    pub fn leader(&self) -> Option<Seat> {
        match self.first.cmp(&self.second) {
            std::cmp::Ordering::Greater => Some(Seat::First),
            std::cmp::Ordering::Less => Some(Seat::Second),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum SessionStatus {
    /// Rounds are being played.
    Playing,
    /// Every round has been won.
    Completed,
    /// Abandoned; terminal.
    Voided,
}

/// A multi-round contest between two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Session {
    /// Store-assigned id (`None` until first save).
    id: Option<SessionId>,
    /// The two participants.
    participants: Participants,
    /// Whether the second participant is the scripted opponent.
    single_participant: bool,
    /// Rounds in play order; always `round_count` long.
    rounds: Vec<Round>,
    /// Session status.
    status: SessionStatus,
    /// Cumulative score pair.
    scores: Scores,
    /// Overall winner once completed; `None` also means a tie.
    winner: Option<Seat>,
    /// When the session was created.
    created_at: DateTime<Utc>,
}

impl Session {
    /// Builds a fresh session with `round_count` pristine rounds.
    #[instrument(skip(participants), fields(first = %participants.first.name, second = %participants.second.name))]
    pub fn new(participants: Participants, single_participant: bool, round_count: usize) -> Self {
        let first_mover = participants.first.name.clone();
        let rounds = (0..round_count).map(|_| Round::new(first_mover.clone())).collect();
        debug!(round_count, "Session rounds allocated");
        Self {
            id: None,
            participants,
            single_participant,
            rounds,
            status: SessionStatus::Playing,
            scores: Scores::default(),
            winner: None,
            created_at: Utc::now(),
        }
    }

    /// Configured number of rounds.
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Assigns the store id. Only the store calls this.
    pub(crate) fn assign_id(&mut self, id: SessionId) {
        self.id = Some(id);
    }

    /// Returns the id, failing for sessions that never went through the store.
    pub(crate) fn require_id(&self) -> Result<SessionId, SessionError> {
        self.id.ok_or_else(|| {
            SessionError::new(SessionErrorKind::InvariantViolation(
                "session has not been saved".to_string(),
            ))
        })
    }

    /// Index of the first round still being played.
    pub fn active_round_index(&self) -> Option<usize> {
        self.rounds.iter().position(Round::is_playing)
    }

    /// The round currently being played, if the session is playing.
    pub fn active_round(&self) -> Option<&Round> {
        if self.status != SessionStatus::Playing {
            return None;
        }
        self.active_round_index().map(|i| &self.rounds[i])
    }

    /// Mutable access to the active round together with the participants.
    ///
    /// # Errors
    ///
    /// Returns [`SessionErrorKind::NoActiveRound`] if the session is not
    /// playing or no round is playing.
    #[track_caller]
    pub(crate) fn active_round_mut(&mut self) -> Result<(&mut Round, &Participants), SessionError> {
        if self.status != SessionStatus::Playing {
            return Err(SessionError::new(SessionErrorKind::NoActiveRound(format!(
                "session is {}",
                self.status
            ))));
        }
        let index = self.active_round_index().ok_or_else(|| {
            SessionError::new(SessionErrorKind::NoActiveRound(
                "no round is playing".to_string(),
            ))
        })?;
        Ok((&mut self.rounds[index], &self.participants))
    }

    /// Checks if every round has been won.
    pub fn all_rounds_won(&self) -> bool {
        self.rounds.iter().all(|round| !round.is_playing())
    }

    /// Credits a round win to `seat` and completes the session if that was the last round.
    #[instrument(skip(self), fields(session_id = ?self.id))]
    pub(crate) fn record_round_win(&mut self, seat: Seat) {
        self.scores.credit(seat);
        info!(
            winner = %self.participants.name(seat),
            first = self.scores.first,
            second = self.scores.second,
            "Round win recorded"
        );

        if self.all_rounds_won() {
            self.status = SessionStatus::Completed;
            self.winner = self.scores.leader();
            info!(
                winner = self.winner.map(|s| self.participants.name(s)).unwrap_or("tie"),
                "Session completed"
            );
        }
    }

    /// Resets status, scores, winner and every round.
    #[instrument(skip(self), fields(session_id = ?self.id))]
    pub(crate) fn restart(&mut self) {
        self.status = SessionStatus::Playing;
        self.winner = None;
        self.scores = Scores::default();
        for round in &mut self.rounds {
            round.reset(&self.participants);
        }
        info!(rounds = self.rounds.len(), "Session restarted");
    }

    /// Freezes the session and discards cumulative scores; rounds are kept as-is.
    #[instrument(skip(self), fields(session_id = ?self.id))]
    pub(crate) fn void(&mut self) {
        self.status = SessionStatus::Voided;
        self.scores = Scores::default();
        self.winner = None;
        info!("Session voided");
    }

    /// Name of the overall winner, if any.
    pub fn winner_name(&self) -> Option<&str> {
        self.winner.map(|seat| self.participants.name(seat))
    }

    /// Sum of per-round wins for `seat` across won rounds.
    pub fn round_wins(&self, seat: Seat) -> u32 {
        self.rounds
            .iter()
            .filter(|round| *round.status() == RoundStatus::Won)
            .map(|round| round.scores().of(seat))
            .sum()
    }
}
