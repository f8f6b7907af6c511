//! Win detection logic for tic-tac-toe.

use super::super::{Board, Square};
use tracing::instrument;

/// The eight winning lines, rows first, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first line whose three cells share one occupant.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    LINES.into_iter().find(|&[a, b, c]| {
        let sq = board.get(a);
        matches!(sq, Some(Square::Occupied(_))) && sq == board.get(b) && sq == board.get(c)
    })
}

/// Checks if there is a winner on the board.
///
/// Returns the name owning three in a row, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<&str> {
    winning_line(board).and_then(|[a, _, _]| board.get(a).and_then(Square::occupant))
}
