//! Cheap, non-optimal opponents for the easy and medium settings.

use crate::rules::check_winner;
use crate::{Board, Mark, Position};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// Picks uniformly at random among the empty squares.
///
/// Returns `None` on a full board.
#[instrument(skip(board, rng))]
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    let choice = board.empty_positions().choose(rng).copied();
    debug!(?choice, "Random move");
    choice
}

/// Rule-based opponent.
///
/// The first rule that applies decides:
/// 1. take the center;
/// 2. take the first free corner (0, 2, 6, 8);
/// 3. complete a line for `computer`;
/// 4. block a line the opponent would complete;
/// 5. play at random.
///
/// Returns `None` on a full board.
#[instrument(skip(board, rng))]
pub fn medium_move<R: Rng + ?Sized>(board: &Board, computer: Mark, rng: &mut R) -> Option<Position> {
    if board.is_empty(Position::Center) {
        debug!(rule = "center", "Medium move");
        return Some(Position::Center);
    }

    if let Some(corner) = Position::CORNERS.into_iter().find(|&pos| board.is_empty(pos)) {
        debug!(rule = "corner", position = %corner, "Medium move");
        return Some(corner);
    }

    if let Some(win) = completing_move(board, computer) {
        debug!(rule = "win", position = %win, "Medium move");
        return Some(win);
    }

    if let Some(block) = completing_move(board, computer.opponent()) {
        debug!(rule = "block", position = %block, "Medium move");
        return Some(block);
    }

    random_move(board, rng)
}

/// First empty square (ascending) where `mark` would complete a line.
pub fn completing_move(board: &Board, mark: Mark) -> Option<Position> {
    board
        .empty_positions()
        .into_iter()
        .find(|&pos| check_winner(&board.with(pos, mark)) == Some(mark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

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
    fn test_random_move_stays_on_empty_squares() {
        let board = board_from("XOX.O.X..");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let pos = random_move(&board, &mut rng).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_random_move_full_board() {
        let board = board_from("XOXOXXOXO");
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_move(&board, &mut rng), None);
    }

    #[test]
    fn test_medium_takes_center_first() {
        let board = board_from("X........");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(medium_move(&board, Mark::O, &mut rng), Some(Position::Center));
    }

    #[test]
    fn test_medium_takes_first_free_corner() {
        let board = board_from("X...O....");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(medium_move(&board, Mark::O, &mut rng), Some(Position::TopRight));
    }

    #[test]
    fn test_medium_corner_beats_block() {
        // X threatens 0-1-2 but a corner is still free, and corners come first.
        let board = board_from("XX..O....");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(medium_move(&board, Mark::O, &mut rng), Some(Position::TopRight));
    }

    #[test]
    fn test_medium_wins_before_blocking() {
        // Corners and center taken; O can win at 7 (1-4-7), X threatens 5.
        let board = board_from("XOXXO.O.X");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(medium_move(&board, Mark::O, &mut rng), Some(Position::BottomCenter));
    }

    #[test]
    fn test_medium_blocks() {
        // Corners and center taken; X threatens 5 (2-5-8), O has no win.
        let board = board_from("XOX.O.OXX");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(medium_move(&board, Mark::O, &mut rng), Some(Position::MiddleRight));
    }

    #[test]
    fn test_medium_falls_back_to_random() {
        // Center and corners taken, nobody can complete a line: 3 and 5 are left.
        let board = board_from("XOX.X.OXO");
        let edges = [Position::MiddleLeft, Position::MiddleRight];

        let mut seen = Vec::new();
        for seed in 0..32 {
            let first = medium_move(&board, Mark::O, &mut StdRng::seed_from_u64(seed)).unwrap();
            let again = medium_move(&board, Mark::O, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert!(edges.contains(&first));
            assert_eq!(first, again);
            if !seen.contains(&first) {
                seen.push(first);
            }
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_completing_move() {
        let board = board_from("OO.XX....");
        assert_eq!(completing_move(&board, Mark::O), Some(Position::TopRight));
        assert_eq!(completing_move(&board, Mark::X), Some(Position::MiddleRight));
    }
}
