//! Participant identity registry.

use crate::error::{SessionError, SessionErrorKind};
use crate::session::{Participant, ParticipantId};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Materializes participant identities when a session is created.
///
/// The engine never queries the registry afterwards; identities travel
/// inside the session by value.
pub trait ParticipantRegistry: Send + Sync {
    /// Registers a participant under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionErrorKind::InvalidConfig`] if the name is blank.
    fn create(&self, name: &str) -> Result<Participant, SessionError>;
}

/// In-memory participant registry.
///
/// Every call creates a new identity, so the same display name may map to
/// several participants across sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryParticipantRegistry {
    participants: Arc<Mutex<Vec<Participant>>>,
}

impl InMemoryParticipantRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory participant registry");
        Self::default()
    }

    /// All participants registered so far, in creation order.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<Participant> {
        self.participants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ParticipantRegistry for InMemoryParticipantRegistry {
    #[instrument(skip(self))]
    fn create(&self, name: &str) -> Result<Participant, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            warn!("Rejected blank participant name");
            return Err(SessionError::new(SessionErrorKind::InvalidConfig(
                "participant name must not be empty".to_string(),
            )));
        }

        let mut participants = self
            .participants
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = participants.len() as ParticipantId + 1;
        let participant = Participant::new(id, name.to_string());
        participants.push(participant.clone());

        debug!(participant_id = id, name, "Participant registered");
        Ok(participant)
    }
}
