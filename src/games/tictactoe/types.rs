//! Core board types for tic-tac-toe rounds.

use super::rules;
use crate::error::{IllegalMoveReason, SessionError, SessionErrorKind};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on a board.
pub const CELL_COUNT: usize = 9;

/// Contents of a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by the named participant.
    Occupied(String),
}

impl Square {
    /// Returns the occupant's name, if any.
    pub fn occupant(&self) -> Option<&str> {
        match self {
            Square::Empty => None,
            Square::Occupied(name) => Some(name.as_str()),
        }
    }

    /// Checks if the square is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Square::Empty)
    }
}

/// One addressable position on a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Cell {
    /// Fixed index in 0..9, row-major.
    index: usize,
    /// What occupies the cell.
    square: Square,
}

impl Cell {
    fn empty(index: usize) -> Self {
        Self {
            index,
            square: Square::Empty,
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored by index, so `cells()[i].index() == i` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(Cell::empty),
        }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<&Square> {
        self.cells.get(index).map(|cell| &cell.square)
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        self.get(index).is_some_and(Square::is_empty)
    }

    /// Returns all cells in index order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Marks the cell at `index` as owned by `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionErrorKind::IllegalMove`] if the index is outside
    /// 0..9 or the cell is already occupied. The board is untouched on error.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn occupy(&mut self, index: usize, name: &str) -> Result<(), SessionError> {
        let cell = self.cells.get_mut(index).ok_or_else(|| {
            SessionError::new(SessionErrorKind::IllegalMove {
                index,
                reason: IllegalMoveReason::OutOfRange,
            })
        })?;

        if !cell.square.is_empty() {
            return Err(SessionError::new(SessionErrorKind::IllegalMove {
                index,
                reason: IllegalMoveReason::Occupied,
            }));
        }

        cell.square = Square::Occupied(name.to_string());
        Ok(())
    }

    /// Returns the name owning a complete line, if any.
    pub fn winner(&self) -> Option<&str> {
        rules::check_winner(self)
    }

    /// Returns the first complete line, if any.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        rules::winning_line(self)
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Indices of unoccupied cells, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .filter(|cell| cell.square.is_empty())
            .map(|cell| cell.index)
            .collect()
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        CELL_COUNT - self.empty_cells().len()
    }

    /// Empties every cell.
    pub(crate) fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.square = Square::Empty;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index].square.occupant() {
                    Some(name) => write!(f, "{}", name.chars().next().unwrap_or('?'))?,
                    None => write!(f, "{}", index)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_indexed_in_order() {
        let board = Board::new();
        for (i, cell) in board.cells().iter().enumerate() {
            assert_eq!(*cell.index(), i);
            assert_eq!(*cell.square(), Square::Empty);
        }
    }

    #[test]
    fn test_occupy_empty_cell() {
        let mut board = Board::new();
        board.occupy(4, "Ana").expect("Center should be free");
        assert_eq!(board.get(4).and_then(Square::occupant), Some("Ana"));
        assert_eq!(board.empty_cells().len(), 8);
    }

    #[test]
    fn test_occupy_out_of_range() {
        let mut board = Board::new();
        let err = board.occupy(9, "Ana").unwrap_err();
        assert_eq!(
            err.kind,
            SessionErrorKind::IllegalMove {
                index: 9,
                reason: IllegalMoveReason::OutOfRange
            }
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_occupy_taken_cell_leaves_board_unchanged() {
        let mut board = Board::new();
        board.occupy(0, "Ana").unwrap();
        let before = board.clone();

        let err = board.occupy(0, "Beto").unwrap_err();
        assert!(matches!(
            err.kind,
            SessionErrorKind::IllegalMove {
                reason: IllegalMoveReason::Occupied,
                ..
            }
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn test_is_empty_by_index() {
        let mut board = Board::new();
        board.occupy(4, "Ana").unwrap();
        assert!(board.is_empty(0));
        assert!(!board.is_empty(4));
        assert!(!board.is_empty(CELL_COUNT));
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut board = Board::new();
        for i in 0..CELL_COUNT {
            board.occupy(i, if i % 2 == 0 { "Ana" } else { "Beto" }).unwrap();
        }
        assert!(board.is_full());
        board.clear();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display_uses_initials_and_indices() {
        let mut board = Board::new();
        board.occupy(0, "Ana").unwrap();
        board.occupy(8, "Beto").unwrap();
        assert_eq!(board.to_string(), "A|1|2\n-+-+-\n3|4|5\n-+-+-\n6|7|B");
    }
}
