//! Session state owned by the controller.

use crate::error::MoveError;
use crate::rules::evaluate;
use crate::settings::Settings;
use crate::{Board, Mark, Outcome, Position, Tally};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Where the controller is in a turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// Waiting for a human to pick a square.
    AwaitingHumanMove,
    /// The computer is choosing its reply. Only seen inside a move request.
    ComputerToMove,
    /// The game is over; only reset or configure leave this phase.
    Terminal,
}

/// Everything that makes up one session: the board, whose turn it is,
/// the score and the chosen settings.
///
/// Only [`crate::GameController`] mutates a session. Observers get it
/// by shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Session {
    /// Current board.
    board: Board,
    /// Mark that moves next.
    turn: Mark,
    /// Finished games so far.
    tally: Tally,
    /// Mode and difficulty.
    settings: Settings,
}

impl Session {
    /// Starts a session with an empty board and a zero tally.
    #[instrument]
    pub fn new(settings: Settings) -> Self {
        Self::from_parts(Board::new(), Mark::X, Tally::default(), settings)
    }

    /// Assembles a session from already validated parts.
    pub(crate) fn from_parts(board: Board, turn: Mark, tally: Tally, settings: Settings) -> Self {
        Self {
            board,
            turn,
            tally,
            settings,
        }
    }

    /// Outcome of the current board, recomputed on every call.
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.board)
    }

    /// Phase between requests: terminal or waiting for a human.
    pub fn phase(&self) -> Phase {
        if self.outcome().is_terminal() {
            Phase::Terminal
        } else {
            Phase::AwaitingHumanMove
        }
    }

    /// Replaces the board with an empty one and gives X the move.
    pub(crate) fn start_game(&mut self) {
        debug!("Starting a fresh board");
        self.board = Board::new();
        self.turn = Mark::X;
    }

    /// Changes mode and difficulty. Does not touch the board.
    pub(crate) fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Places `mark` and returns the resulting outcome.
    pub(crate) fn place(&mut self, pos: Position, mark: Mark) -> Result<Outcome, MoveError> {
        self.board.place(pos, mark)?;
        Ok(self.outcome())
    }

    /// Sets whose turn it is.
    pub(crate) fn set_turn(&mut self, mark: Mark) {
        self.turn = mark;
    }

    /// Adds a finished game to the tally.
    pub(crate) fn record(&mut self, outcome: Outcome) {
        self.tally.record(outcome);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
