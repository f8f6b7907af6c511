//! Session storage.

use crate::error::{SessionError, SessionErrorKind};
use crate::session::{Session, SessionId};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Opaque load/save storage for sessions, keyed by id.
///
/// Implementations only need to be correct for a single writer per id;
/// the engine serializes writers on the same session.
pub trait SessionStore: Send + Sync {
    /// Loads a copy of the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionErrorKind::NotFound`] if no session has this id.
    fn load(&self, id: SessionId) -> Result<Session, SessionError>;

    /// Saves the session, assigning an id on first save, and returns the stored value.
    fn save(&self, session: Session) -> Result<Session, SessionError>;

    /// Ids of all stored sessions, ascending.
    fn list(&self) -> Result<Vec<SessionId>, SessionError>;
}

/// In-memory session store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<Mutex<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    sessions: BTreeMap<SessionId, Session>,
    last_id: SessionId,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory session store");
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for InMemorySessionStore {
    #[instrument(skip(self))]
    fn load(&self, id: SessionId) -> Result<Session, SessionError> {
        let session = self.state().sessions.get(&id).cloned();
        session.ok_or_else(|| {
            debug!(session_id = id, "Session not found");
            SessionError::new(SessionErrorKind::NotFound(id))
        })
    }

    #[instrument(skip(self, session), fields(session_id = ?session.id()))]
    fn save(&self, mut session: Session) -> Result<Session, SessionError> {
        let mut state = self.state();
        let id = match *session.id() {
            Some(id) => {
                if !state.sessions.contains_key(&id) {
                    warn!(session_id = id, "Saving session with unknown id");
                    return Err(SessionError::new(SessionErrorKind::NotFound(id)));
                }
                id
            }
            None => {
                state.last_id += 1;
                let id = state.last_id;
                session.assign_id(id);
                info!(session_id = id, "Assigned session id");
                id
            }
        };
        state.sessions.insert(id, session.clone());
        debug!(session_id = id, "Session saved");
        Ok(session)
    }

    #[instrument(skip(self))]
    fn list(&self) -> Result<Vec<SessionId>, SessionError> {
        let ids: Vec<_> = self.state().sessions.keys().copied().collect();
        info!(count = ids.len(), "Listed sessions");
        Ok(ids)
    }
}
