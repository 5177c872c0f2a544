//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a board
//! according to tic-tac-toe rules. They never mutate their input,
//! so search and the heuristics call them on hypothetical boards.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{check_winner, LINES};

use crate::types::{Board, Outcome};

/// Classifies a board as ongoing, won or drawn.
///
/// A completed line takes precedence over a full board.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::Won(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}
