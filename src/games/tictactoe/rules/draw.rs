//! Draw detection logic for tic-tac-toe.

use super::super::Board;
use super::win::check_winner;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| !cell.square().is_empty())
}

/// A full board with no winner.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(order: &[(usize, &str)]) -> Board {
        let mut board = Board::new();
        for &(index, name) in order {
            board.occupy(index, name).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let board = fill(&[(4, "Ana")]);
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // A B A / B B A / A A B
        let board = fill(&[
            (0, "A"),
            (1, "B"),
            (2, "A"),
            (3, "B"),
            (4, "B"),
            (5, "A"),
            (6, "A"),
            (7, "A"),
            (8, "B"),
        ]);
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let board = fill(&[
            (0, "A"),
            (1, "A"),
            (2, "A"),
            (3, "B"),
            (4, "B"),
            (5, "A"),
            (6, "B"),
            (7, "A"),
            (8, "B"),
        ]);
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
