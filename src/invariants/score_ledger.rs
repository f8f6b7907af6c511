//! Score ledger invariant: cumulative scores are the sum of round wins.

use super::Invariant;
use crate::session::{Seat, Session, SessionStatus};

/// Invariant: each cumulative score equals that participant's won rounds.
///
/// Voided sessions are exempt; voiding zeroes the scores but keeps the rounds.
pub struct ScoreLedgerInvariant;

impl Invariant<Session> for ScoreLedgerInvariant {
    fn holds(session: &Session) -> bool {
        if *session.status() == SessionStatus::Voided {
            return *session.scores().first() == 0 && *session.scores().second() == 0;
        }

        [Seat::First, Seat::Second]
            .into_iter()
            .all(|seat| session.scores().of(seat) == session.round_wins(seat))
    }

    fn description() -> &'static str {
        "Cumulative scores equal the per-round wins of each participant"
    }
}
