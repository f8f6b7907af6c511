//! Completion invariant: a session completes exactly when every round is won.

use super::Invariant;
use crate::session::{Session, SessionStatus};

/// Invariant: `Completed` iff all rounds are won, and the winner follows the scores.
///
/// A completed session's winner is the participant with the strictly higher
/// score (none on a tie). Sessions that are not completed have no winner.
pub struct CompletionInvariant;

impl Invariant<Session> for CompletionInvariant {
    fn holds(session: &Session) -> bool {
        match session.status() {
            SessionStatus::Completed => {
                session.all_rounds_won() && *session.winner() == session.scores().leader()
            }
            SessionStatus::Playing => !session.all_rounds_won() && session.winner().is_none(),
            SessionStatus::Voided => session.winner().is_none(),
        }
    }

    fn description() -> &'static str {
        "Session is completed exactly when every round is won, with the leader as winner"
    }
}
