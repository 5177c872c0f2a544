//! Persisted form of a session and its validation.
//!
//! The saved form is deliberately loose (strings and a vector) so that
//! whatever a store hands back can be deserialized and then checked
//! here, instead of trusting the store to produce a well-formed board.

use crate::session::Session;
use crate::settings::{Difficulty, Mode, Settings};
use crate::{Board, Mark, Square, Tally};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A session as written to storage.
///
/// ```json
/// {"board":[null,"X",null,"O",null,null,null,null,null],
///  "currentPlayer":"X","xWins":0,"oWins":1,"draws":2,
///  "isAIEnabled":true,"difficulty":"hard"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    /// Nine cells, `null` for empty, `"X"` or `"O"` otherwise.
    pub board: Vec<Option<String>>,
    /// `"X"` or `"O"`.
    pub current_player: String,
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Drawn games.
    pub draws: u32,
    /// True in human-vs-computer mode.
    #[serde(rename = "isAIEnabled")]
    pub is_ai_enabled: bool,
    /// `"easy"`, `"medium"` or `"hard"`; missing means easy.
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Why a saved session was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SnapshotError {
    /// The board did not have exactly nine cells.
    #[display("Board has {} cells, expected 9", _0)]
    WrongCellCount(usize),

    /// A cell held something other than empty, X or O.
    #[display("Unknown cell value {:?}", _0)]
    UnknownCell(String),

    /// The turn marker was not X or O.
    #[display("Unknown player {:?}", _0)]
    UnknownTurn(String),

    /// The difficulty was not one of the known levels.
    #[display("Unknown difficulty {:?}", _0)]
    UnknownDifficulty(String),

    /// A human-vs-computer session saved with the computer to move.
    #[display("Saved human-vs-computer session has {} to move", _0)]
    ComputerToMove(Mark),
}

impl std::error::Error for SnapshotError {}

impl From<&Session> for SavedSession {
    fn from(session: &Session) -> Self {
        let settings = session.settings();
        Self {
            board: session
                .board()
                .squares()
                .iter()
                .map(|sq| sq.mark().map(|mark| mark.to_string()))
                .collect(),
            current_player: session.turn().to_string(),
            x_wins: session.tally().x_wins,
            o_wins: session.tally().o_wins,
            draws: session.tally().draws,
            is_ai_enabled: settings.mode.computer_enabled(),
            difficulty: Some(settings.difficulty.to_string()),
        }
    }
}

impl TryFrom<SavedSession> for Session {
    type Error = SnapshotError;

    #[instrument(skip(saved))]
    fn try_from(saved: SavedSession) -> Result<Self, Self::Error> {
        let cells: [Option<String>; 9] = saved
            .board
            .try_into()
            .map_err(|cells: Vec<_>| SnapshotError::WrongCellCount(cells.len()))?;

        let mut squares = [Square::Empty; 9];
        for (square, cell) in squares.iter_mut().zip(cells) {
            *square = match cell {
                None => Square::Empty,
                Some(value) => match parse_mark(&value) {
                    Some(mark) => Square::Occupied(mark),
                    None => return Err(SnapshotError::UnknownCell(value)),
                },
            };
        }

        let turn = parse_mark(&saved.current_player)
            .ok_or_else(|| SnapshotError::UnknownTurn(saved.current_player.clone()))?;

        let difficulty = match saved.difficulty {
            None => Difficulty::default(),
            Some(name) => {
                Difficulty::from_str(&name).map_err(|_| SnapshotError::UnknownDifficulty(name))?
            }
        };

        let mode = if saved.is_ai_enabled {
            Mode::HumanVsComputer
        } else {
            Mode::HumanVsHuman
        };
        if mode.computer_enabled() && turn != Mark::X {
            return Err(SnapshotError::ComputerToMove(turn));
        }

        Ok(Session::from_parts(
            Board::from_squares(squares),
            turn,
            Tally::new(saved.x_wins, saved.o_wins, saved.draws),
            Settings::new(mode, difficulty),
        ))
    }
}

fn parse_mark(value: &str) -> Option<Mark> {
    Mark::from_str(value).ok()
}
