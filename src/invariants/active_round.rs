//! Active round invariant: rounds are played strictly in order.

use super::Invariant;
use crate::session::{Session, SessionStatus};

/// Invariant: while a session is playing, exactly one round is active.
///
/// Every round before the active one has been won and every round after it
/// is pristine, because the session only moves on once a round has a winner.
pub struct ActiveRoundInvariant;

impl Invariant<Session> for ActiveRoundInvariant {
    fn holds(session: &Session) -> bool {
        if *session.status() != SessionStatus::Playing {
            return true;
        }

        let Some(active) = session.active_round_index() else {
            return false;
        };

        let rounds = session.rounds();
        rounds[..active].iter().all(|round| !round.is_playing())
            && rounds[active + 1..].iter().all(|round| round.is_pristine())
    }

    fn description() -> &'static str {
        "Exactly one round is active; earlier rounds are won and later rounds are pristine"
    }
}
