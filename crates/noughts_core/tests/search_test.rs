//! Exhaustive checks of the evaluator and the hard opponent over every
//! reachable position.

use noughts_core::rules::{check_winner, evaluate, LINES};
use noughts_core::search::{best_move, score};
use noughts_core::{Board, Difficulty, Mark, Outcome, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// Every board reachable by legal play from the empty board, X first.
fn reachable_boards() -> HashSet<Board> {
    fn walk(board: Board, to_move: Mark, seen: &mut HashSet<Board>) {
        if !seen.insert(board) || evaluate(&board).is_terminal() {
            return;
        }
        for pos in board.empty_positions() {
            walk(board.with(pos, to_move), to_move.opponent(), seen);
        }
    }

    let mut seen = HashSet::new();
    walk(Board::new(), Mark::X, &mut seen);
    seen
}

fn count(board: &Board, mark: Mark) -> usize {
    board
        .squares()
        .iter()
        .filter(|sq| sq.mark() == Some(mark))
        .count()
}

#[test]
fn test_reachable_boards_have_at_most_one_winner() {
    let boards = reachable_boards();
    assert_eq!(boards.len(), 5478);

    for board in &boards {
        let x_line = LINES
            .iter()
            .any(|line| line.iter().all(|&p| board.get(p).mark() == Some(Mark::X)));
        let o_line = LINES
            .iter()
            .any(|line| line.iter().all(|&p| board.get(p).mark() == Some(Mark::O)));
        assert!(!(x_line && o_line), "two winners on {}", board.display());

        let outcome = evaluate(board);
        match outcome {
            Outcome::Won(mark) => assert_eq!(check_winner(board), Some(mark)),
            Outcome::Draw => assert!(board.empty_positions().is_empty() && !x_line && !o_line),
            Outcome::Ongoing => assert!(!board.empty_positions().is_empty() && !x_line && !o_line),
        }
    }
}

#[test]
fn test_best_move_never_throws_away_a_draw() {
    for board in reachable_boards() {
        let o_to_move = count(&board, Mark::X) == count(&board, Mark::O) + 1;
        if !o_to_move || evaluate(&board).is_terminal() {
            continue;
        }

        let scores: Vec<(Position, i32)> = board
            .empty_positions()
            .into_iter()
            .map(|pos| (pos, score(&board.with(pos, Mark::O), Mark::O, Mark::X, false)))
            .collect();
        let best_score = scores.iter().map(|&(_, s)| s).max().expect("Ongoing board");
        let first_best = scores
            .iter()
            .find(|&&(_, s)| s == best_score)
            .map(|&(p, _)| p);

        let chosen = best_move(&board, Mark::O, Mark::X);
        assert_eq!(chosen, first_best, "on\n{}", board.display());
        if best_score >= 0 {
            let chosen_score = scores
                .iter()
                .find(|&&(p, _)| Some(p) == chosen)
                .map(|&(_, s)| s);
            assert!(chosen_score >= Some(0), "losing move on\n{}", board.display());
        }
    }
}

/// Plays every human strategy against the hard opponent; the human never wins.
#[test]
fn test_hard_never_loses() {
    fn human_turn(board: Board, games: &mut usize) {
        for pos in board.empty_positions() {
            let after_human = board.with(pos, Mark::X);
            match evaluate(&after_human) {
                Outcome::Won(_) => panic!("human won with\n{}", after_human.display()),
                Outcome::Draw => *games += 1,
                Outcome::Ongoing => {
                    let mut rng = StdRng::seed_from_u64(0);
                    let reply = Difficulty::Hard
                        .choose_move(&after_human, Mark::O, &mut rng)
                        .expect("Ongoing board has an empty square");
                    let after_computer = after_human.with(reply, Mark::O);
                    if evaluate(&after_computer).is_terminal() {
                        assert_ne!(evaluate(&after_computer), Outcome::Won(Mark::X));
                        *games += 1;
                    } else {
                        human_turn(after_computer, games);
                    }
                }
            }
        }
    }

    let mut games = 0;
    human_turn(Board::new(), &mut games);
    assert!(games > 0);
}
