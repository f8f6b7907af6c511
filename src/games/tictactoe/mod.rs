//! Tic-tac-toe board, rules and rounds.

mod round;
mod rules;
mod types;

pub use round::{Round, RoundOutcome, RoundStatus};
pub use rules::{LINES, check_winner, is_draw, is_full, winning_line};
pub use types::{Board, CELL_COUNT, Cell, Square};
