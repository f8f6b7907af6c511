//! Single winner invariant: no board has lines for both participants.

use super::Invariant;
use crate::games::tictactoe::{LINES, RoundStatus, Square};
use crate::session::Session;

/// Invariant: at most one participant owns a complete line on any board,
/// and a won round's recorded winner is the owner of that line.
pub struct SingleWinnerInvariant;

impl Invariant<Session> for SingleWinnerInvariant {
    fn holds(session: &Session) -> bool {
        let participants = session.participants();
        session.rounds().iter().all(|round| {
            let board = round.board();
            let mut owners = LINES.iter().filter_map(|&[a, b, c]| {
                let sq = board.get(a)?;
                (matches!(sq, Square::Occupied(_)) && Some(sq) == board.get(b) && Some(sq) == board.get(c))
                    .then(|| sq.occupant())
                    .flatten()
            });
            let first_owner = owners.next();
            let single = owners.all(|owner| Some(owner) == first_owner);

            let recorded = match round.status() {
                RoundStatus::Won => {
                    round.winner().map(|seat| participants.name(seat)) == first_owner
                }
                RoundStatus::Playing => first_owner.is_none(),
            };

            single && recorded
        })
    }

    fn description() -> &'static str {
        "At most one participant completes a line, and only won rounds have one"
    }
}
