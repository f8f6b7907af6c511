//! Session engine: the operations callers use to create and play sessions.

use crate::config::EngineConfig;
use crate::error::{SessionError, SessionErrorKind};
use crate::games::tictactoe::RoundOutcome;
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::opponent::OpponentPolicy;
use crate::registry::{InMemoryParticipantRegistry, ParticipantRegistry};
use crate::session::{Participants, Session, SessionId, SessionStatus};
use crate::store::{InMemorySessionStore, SessionStore};
use crate::view::{EMPTY_MARKER, SessionView};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Orchestrates sessions on top of a store, a participant registry and an opponent policy.
///
/// Every mutating operation on one session id runs under that session's
/// lock, from load to save. Different sessions never wait on each other.
pub struct SessionEngine<S = InMemorySessionStore, R = InMemoryParticipantRegistry> {
    store: S,
    registry: R,
    opponent: Box<dyn OpponentPolicy>,
    config: EngineConfig,
    locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl SessionEngine {
    /// Creates an engine with in-memory storage and the configured opponent.
    #[instrument(skip(config))]
    pub fn in_memory(config: EngineConfig) -> Self {
        let opponent = config.opponent().build(*config.seed());
        Self::new(
            InMemorySessionStore::new(),
            InMemoryParticipantRegistry::new(),
            opponent,
            config,
        )
    }
}

impl<S, R> SessionEngine<S, R>
where
    S: SessionStore,
    R: ParticipantRegistry,
{
    /// Creates an engine from its collaborators.
    #[instrument(skip_all, fields(opponent = opponent.name()))]
    pub fn new(store: S, registry: R, opponent: Box<dyn OpponentPolicy>, config: EngineConfig) -> Self {
        info!("Creating session engine");
        Self {
            store,
            registry,
            opponent,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Creates a session with `round_count` pristine rounds.
    ///
    /// In single-participant mode `second` is ignored and the scripted
    /// opponent takes the second seat.
    ///
    /// # Errors
    ///
    /// Returns [`SessionErrorKind::InvalidConfig`] if `round_count` is outside
    /// `1..=max_round_count`, a name is blank or equal to the empty-cell
    /// marker, both names are equal, or the first name is the reserved
    /// opponent name in single-participant mode.
    #[instrument(skip(self))]
    pub fn create_session(
        &self,
        single_participant: bool,
        first: &str,
        second: &str,
        round_count: usize,
    ) -> Result<Session, SessionError> {
        let max = *self.config.max_round_count();
        if round_count < 1 || round_count > max {
            warn!(round_count, max, "Rejected round count");
            return Err(invalid_config(format!(
                "round count must be between 1 and {}, got {}",
                max, round_count
            )));
        }

        if first.trim().is_empty() || (!single_participant && second.trim().is_empty()) {
            warn!("Rejected blank participant name");
            return Err(invalid_config("participant names must not be empty"));
        }
        if first.trim() == EMPTY_MARKER || (!single_participant && second.trim() == EMPTY_MARKER) {
            warn!("Rejected participant named after the empty-cell marker");
            return Err(invalid_config(format!("'{}' is not a valid participant name", EMPTY_MARKER)));
        }

        let second = if single_participant {
            if first.trim() == self.config.opponent_name().as_str() {
                warn!(name = first, "Participant took the reserved opponent name");
                return Err(invalid_config(format!(
                    "'{}' is reserved for the scripted opponent",
                    first.trim()
                )));
            }
            self.config.opponent_name().as_str()
        } else {
            second
        };

        if first.trim() == second.trim() {
            warn!(name = first, "Rejected identical participant names");
            return Err(invalid_config("participants must have different names"));
        }

        let participants = Participants::new(self.registry.create(first)?, self.registry.create(second)?);
        let session = self
            .store
            .save(Session::new(participants, single_participant, round_count))?;

        info!(
            session_id = ?session.id(),
            round_count,
            single_participant,
            "Created new session"
        );
        Ok(session)
    }

    /// Plays the current turn holder's mark at `cell`.
    ///
    /// In single-participant mode the scripted opponent answers within the
    /// same call, so the returned session never waits on the opponent.
    /// Nothing is persisted unless the whole move, including the reply,
    /// succeeds.
    ///
    /// # Errors
    ///
    /// - [`SessionErrorKind::NotFound`] for an unknown id.
    /// - [`SessionErrorKind::NoActiveRound`] if the session is not playing.
    /// - [`SessionErrorKind::IllegalMove`] if the cell is out of range or taken.
    #[instrument(skip(self))]
    pub fn make_move(&self, id: SessionId, cell: usize) -> Result<Session, SessionError> {
        self.with_session(id, |engine, session| {
            let outcome = engine.play_turn(session, Some(cell))?;

            if !matches!(outcome, RoundOutcome::Won(_))
                && *session.single_participant()
                && engine.opponent_to_move(session)
            {
                engine.play_turn(session, None)?;
            }
            Ok(())
        })
    }

    /// Resets every round, scores and the winner; participants and round count stay.
    ///
    /// # Errors
    ///
    /// - [`SessionErrorKind::NotFound`] for an unknown id.
    /// - [`SessionErrorKind::SessionVoided`] if the session was voided.
    #[instrument(skip(self))]
    pub fn restart_session(&self, id: SessionId) -> Result<Session, SessionError> {
        self.with_session(id, |_, session| {
            if *session.status() == SessionStatus::Voided {
                warn!(session_id = id, "Restart attempted on voided session");
                return Err(SessionError::new(SessionErrorKind::SessionVoided(id)));
            }
            session.restart();
            Ok(())
        })
    }

    /// Voids the session: terminal status, scores zeroed, rounds left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`SessionErrorKind::NotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn void_session(&self, id: SessionId) -> Result<Session, SessionError> {
        self.with_session(id, |_, session| {
            session.void();
            Ok(())
        })
    }

    /// Projects the active round of a playing session.
    ///
    /// # Errors
    ///
    /// - [`SessionErrorKind::NotFound`] for an unknown id.
    /// - [`SessionErrorKind::NoActiveRound`] if the session is not playing.
    #[instrument(skip(self))]
    pub fn session_view(&self, id: SessionId) -> Result<SessionView, SessionError> {
        let session = self.store.load(id)?;
        SessionView::project(&session)
    }

    /// Returns the full session regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`SessionErrorKind::NotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn session(&self, id: SessionId) -> Result<Session, SessionError> {
        self.store.load(id)
    }

    /// Ids of all stored sessions, ascending.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Result<Vec<SessionId>, SessionError> {
        self.store.list()
    }

    /// Runs `mutate` on a loaded copy under the session lock, checks
    /// invariants and saves. On any error the stored session is untouched.
    fn with_session<F>(&self, id: SessionId, mutate: F) -> Result<Session, SessionError>
    where
        F: FnOnce(&Self, &mut Session) -> Result<(), SessionError>,
    {
        let lock = self.lock_for(id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut session = match self.store.load(id) {
            Ok(session) => session,
            Err(e) => {
                if matches!(e.kind(), SessionErrorKind::NotFound(_)) {
                    self.forget_lock(id);
                }
                return Err(e);
            }
        };
        mutate(self, &mut session)?;

        SessionInvariants::check_all(&session).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(session_id = id, %descriptions, "Session invariants violated, not saving");
            SessionError::new(SessionErrorKind::InvariantViolation(descriptions))
        })?;

        self.store.save(session)
    }

    fn lock_for(&self, id: SessionId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(id).or_default())
    }

    /// Drops the lock entry of an id the store does not know.
    fn forget_lock(&self, id: SessionId) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks.remove(&id).is_some() {
            debug!(session_id = id, "Dropped lock for unknown session");
        }
    }

    fn opponent_to_move(&self, session: &Session) -> bool {
        session
            .active_round()
            .is_some_and(|round| round.turn_holder() == self.config.opponent_name())
    }

    /// Applies one move for the active round's turn holder.
    ///
    /// `cell` is `None` when the opponent policy should pick.
    #[instrument(skip(self, session), fields(session_id = ?session.id()))]
    fn play_turn(&self, session: &mut Session, cell: Option<usize>) -> Result<RoundOutcome, SessionError> {
        let (round, participants) = session.active_round_mut()?;

        let mover = participants.seat_of(round.turn_holder()).ok_or_else(|| {
            warn!(turn_holder = %round.turn_holder(), "Turn holder is not a participant");
            SessionError::new(SessionErrorKind::NoActiveRound(format!(
                "turn holder '{}' is not a participant",
                round.turn_holder()
            )))
        })?;

        let cell = match cell {
            Some(cell) => cell,
            None => {
                let chosen = self.opponent.choose(round.board())?;
                debug!(cell = chosen, policy = self.opponent.name(), "Opponent chose cell");
                chosen
            }
        };

        let outcome = round.apply_move(mover, participants, cell).inspect_err(|e| {
            warn!(cell, seat = %mover, error = %e, "Move rejected");
        })?;

        if let RoundOutcome::Won(seat) = outcome {
            session.record_round_win(seat);
        }

        debug!(cell, seat = %mover, ?outcome, "Turn applied");
        Ok(outcome)
    }
}

#[track_caller]
fn invalid_config(message: impl Into<String>) -> SessionError {
    SessionError::new(SessionErrorKind::InvalidConfig(message.into()))
}

impl<S, R> std::fmt::Debug for SessionEngine<S, R>
where
    S: std::fmt::Debug,
    R: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEngine")
            .field("store", &self.store)
            .field("registry", &self.registry)
            .field("opponent", &self.opponent.name())
            .field("config", &self.config)
            .finish()
    }
}
