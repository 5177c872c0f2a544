//! Exhaustive minimax search for the hard opponent.
//!
//! The tree is small enough (at most 9! leaves) to solve exactly, so
//! there is no depth limit, pruning or transposition table. Each node
//! works on its own copy of the board.

use crate::rules::evaluate;
use crate::{Board, Mark, Outcome, Position};
use tracing::{debug, instrument};

/// Score of a win found on the candidate move itself.
const WIN: i32 = 10;

/// Picks the move with the best minimax score for `computer`.
///
/// Candidates are tried in ascending index order and only a strictly
/// better score replaces the current pick, so ties go to the lowest
/// index. Returns `None` on a full board.
#[instrument(skip(board), fields(empty = board.empty_positions().len()))]
pub fn best_move(board: &Board, computer: Mark, human: Mark) -> Option<Position> {
    let mut search = Minimax::new(computer, human);
    let mut best: Option<(Position, i32)> = None;

    for pos in board.empty_positions() {
        let child = board.with(pos, computer);
        let score = search.score(&child, 0, false);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    if let Some((pos, score)) = best {
        debug!(
            position = %pos,
            score,
            nodes = search.nodes,
            "Search picked move"
        );
    }
    best.map(|(pos, _)| pos)
}

/// Minimax value of `board` from `computer`'s point of view.
///
/// `maximizing` says whose turn it is on `board`: the computer's when
/// true, the human's otherwise. Depth starts at zero.
pub fn score(board: &Board, computer: Mark, human: Mark, maximizing: bool) -> i32 {
    Minimax::new(computer, human).score(board, 0, maximizing)
}

/// Recursion state: the two marks and a node counter for diagnostics.
struct Minimax {
    computer: Mark,
    human: Mark,
    nodes: u64,
}

impl Minimax {
    fn new(computer: Mark, human: Mark) -> Self {
        Self {
            computer,
            human,
            nodes: 0,
        }
    }

    fn score(&mut self, board: &Board, depth: i32, maximizing: bool) -> i32 {
        self.nodes += 1;

        match evaluate(board) {
            Outcome::Won(mark) if mark == self.computer => return WIN - depth,
            Outcome::Won(_) => return depth - WIN,
            Outcome::Draw => return 0,
            Outcome::Ongoing => {}
        }

        let mark = if maximizing { self.computer } else { self.human };
        let scores = board
            .empty_positions()
            .into_iter()
            .map(|pos| self.score(&board.with(pos, mark), depth + 1, !maximizing))
            .collect::<Vec<_>>();

        if maximizing {
            scores.into_iter().max().unwrap_or(0)
        } else {
            scores.into_iter().min().unwrap_or(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(layout: &str) -> Board {
        let mut board = Board::new();
        for (pos, c) in Position::ALL.into_iter().zip(layout.chars()) {
            match c {
                'X' => board.place(pos, Mark::X).unwrap(),
                'O' => board.place(pos, Mark::O).unwrap(),
                _ => {}
            }
        }
        board
    }

    #[test]
    fn test_takes_immediate_win() {
        // O can win at 2 (top row) or block at 8; winning scores higher.
        let board = board_from("OO.XX....");
        assert_eq!(best_move(&board, Mark::O, Mark::X), Some(Position::TopRight));
    }

    #[test]
    fn test_blocks_forced_loss() {
        // X threatens 0-4-8; O must take 8.
        let board = board_from("X...X..O.");
        assert_eq!(best_move(&board, Mark::O, Mark::X), Some(Position::BottomRight));
    }

    #[test]
    fn test_prefers_faster_win() {
        // O wins now at 5 (middle row) rather than later.
        let board = board_from("XX.OO.X..");
        assert_eq!(best_move(&board, Mark::O, Mark::X), Some(Position::MiddleRight));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = board_from("XOXOXXOXO");
        assert_eq!(best_move(&board, Mark::O, Mark::X), None);
    }

    #[test]
    fn test_search_does_not_touch_board() {
        let board = board_from("X........");
        let before = board;
        let _ = best_move(&board, Mark::O, Mark::X);
        assert_eq!(board, before);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        assert_eq!(score(&Board::new(), Mark::O, Mark::X, true), 0);
    }

    #[test]
    fn test_terminal_scores() {
        let o_won = board_from("OOO.XX.X.");
        assert_eq!(score(&o_won, Mark::O, Mark::X, false), WIN);
        let x_won = board_from("XXX.OO.O.");
        assert_eq!(score(&x_won, Mark::O, Mark::X, true), -WIN);
    }
}
