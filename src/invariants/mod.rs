//! First-class session invariants.
//!
//! Invariants are logical properties that must hold for every stored
//! session. The engine checks them after each mutation and refuses to
//! persist a session that violates one.

mod active_round;
mod completion;
mod score_ledger;
mod single_winner;

pub use active_round::ActiveRoundInvariant;
pub use completion::CompletionInvariant;
pub use score_ledger::ScoreLedgerInvariant;
pub use single_winner::SingleWinnerInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns every violation, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if let Err(mut found) = <(I1, I2) as InvariantSet<S>>::check_all(state) {
            violations.append(&mut found);
        }

        if let Err(mut found) = <(I3, I4) as InvariantSet<S>>::check_all(state) {
            violations.append(&mut found);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (
    ActiveRoundInvariant,
    ScoreLedgerInvariant,
    CompletionInvariant,
    SingleWinnerInvariant,
);


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_invariant_set_holds_for_new_session() {
        assert!(SessionInvariants::check_all(&session(3)).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_round_win() {
        let mut s = session(2);
        win_active_round_for_first(&mut s);
        assert!(SessionInvariants::check_all(&s).is_ok());
        assert_eq!(s.active_round_index(), Some(1));
    }

    #[test]
    fn test_invariant_set_holds_after_restart_and_void() {
        let mut s = session(2);
        win_active_round_for_first(&mut s);
        s.restart();
        assert!(SessionInvariants::check_all(&s).is_ok());
        win_active_round_for_first(&mut s);
        s.void();
        assert!(SessionInvariants::check_all(&s).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (ActiveRoundInvariant, ScoreLedgerInvariant);
        assert!(TwoInvariants::check_all(&session(1)).is_ok());
    }
}
