//! Move selection for the scripted opponent.

use crate::error::{SessionError, SessionErrorKind};
use crate::games::tictactoe::{Board, CELL_COUNT};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument, warn};

/// Strategy that picks a cell for the scripted opponent.
///
/// Implementations keep no memory of previous games and must only return
/// indices of currently empty cells.
pub trait OpponentPolicy: Send + Sync {
    /// Picks an empty cell on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionErrorKind::NoLegalMove`] if the board is full.
    fn choose(&self, board: &Board) -> Result<usize, SessionError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

#[track_caller]
fn no_legal_move() -> SessionError {
    warn!("Opponent asked to move on a full board");
    SessionError::new(SessionErrorKind::NoLegalMove)
}

/// Picks uniformly at random among the empty cells.
#[derive(Debug)]
pub struct RandomOpponent {
    rng: Mutex<StdRng>,
}

impl RandomOpponent {
    /// Creates a policy seeded from OS entropy.
    #[instrument]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a reproducible policy.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentPolicy for RandomOpponent {
    #[instrument(skip_all)]
    fn choose(&self, board: &Board) -> Result<usize, SessionError> {
        let empty = board.empty_cells();
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let index = *empty.choose(&mut *rng).ok_or_else(|| no_legal_move())?;
        debug!(index, candidates = empty.len(), "Random opponent chose cell");
        Ok(index)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Picks the lowest-indexed empty cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl OpponentPolicy for FirstAvailable {
    #[instrument(skip_all)]
    fn choose(&self, board: &Board) -> Result<usize, SessionError> {
        let index = (0..CELL_COUNT)
            .find(|&index| board.is_empty(index))
            .ok_or_else(|| no_legal_move())?;
        debug!(index, "First-available opponent chose cell");
        Ok(index)
    }

    fn name(&self) -> &str {
        "first_available"
    }
}

/// Opponent policy selectable from configuration.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OpponentKind {
    /// [`RandomOpponent`].
    #[default]
    Random,
    /// [`FirstAvailable`].
    FirstAvailable,
}

impl OpponentKind {
    /// Builds the policy, seeding the random one when `seed` is given.
    #[instrument]
    pub fn build(self, seed: Option<u64>) -> Box<dyn OpponentPolicy> {
        match (self, seed) {
            (OpponentKind::Random, Some(seed)) => Box::new(RandomOpponent::seeded(seed)),
            (OpponentKind::Random, None) => Box::new(RandomOpponent::new()),
            (OpponentKind::FirstAvailable, _) => Box::new(FirstAvailable),
        }
    }
}
