//! Game mode and computer difficulty.

use crate::heuristics::{medium_move, random_move};
use crate::search::best_move;
use crate::{Board, Mark, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Who sits on the O side of the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Two humans share the board.
    #[default]
    #[strum(to_string = "human-vs-human", serialize = "pvp")]
    HumanVsHuman,
    /// The human plays X against the computer playing O.
    #[strum(to_string = "human-vs-computer", serialize = "pvc")]
    HumanVsComputer,
}

impl Mode {
    /// Returns true when the computer answers every human move.
    pub fn computer_enabled(self) -> bool {
        matches!(self, Mode::HumanVsComputer)
    }
}

/// Strength of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Difficulty {
    /// Plays a random empty square.
    #[default]
    Easy,
    /// Center, corners, win, block, then random.
    Medium,
    /// Full minimax search; never loses.
    Hard,
}

impl Difficulty {
    /// Asks the matching policy for a move on `board`.
    ///
    /// Returns `None` only when the board is full.
    #[instrument(skip(board, rng))]
    pub fn choose_move<R: Rng + ?Sized>(
        self,
        board: &Board,
        computer: Mark,
        rng: &mut R,
    ) -> Option<Position> {
        match self {
            Difficulty::Easy => random_move(board, rng),
            Difficulty::Medium => medium_move(board, computer, rng),
            Difficulty::Hard => best_move(board, computer, computer.opponent()),
        }
    }
}

/// Mode plus difficulty, as chosen by the player.
///
/// The difficulty is kept in human-vs-human mode too so switching
/// back to the computer restores the previous choice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_new::new,
)]
pub struct Settings {
    /// Game mode.
    pub mode: Mode,
    /// Computer strength, used in [`Mode::HumanVsComputer`].
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Settings {
    /// Human against the computer at the given difficulty.
    pub fn versus_computer(difficulty: Difficulty) -> Self {
        Self::new(Mode::HumanVsComputer, difficulty)
    }

    /// Two humans.
    pub fn two_players() -> Self {
        Self::new(Mode::HumanVsHuman, Difficulty::default())
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mode {
            Mode::HumanVsHuman => write!(f, "{}", self.mode),
            Mode::HumanVsComputer => write!(f, "{} ({})", self.mode, self.difficulty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_known_names() {
        assert_eq!(Mode::from_str("human-vs-computer"), Ok(Mode::HumanVsComputer));
        assert_eq!(Mode::from_str("pvp"), Ok(Mode::HumanVsHuman));
        assert_eq!(Difficulty::from_str("hard"), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!(Mode::HumanVsComputer.to_string(), "human-vs-computer");
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert!(Difficulty::from_str("impossible").is_err());
        assert!(Mode::from_str("computer-vs-computer").is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Settings::versus_computer(Difficulty::Hard)).unwrap();
        assert_eq!(json, r#"{"mode":"human-vs-computer","difficulty":"hard"}"#);
        let parsed: Settings = serde_json::from_str(r#"{"mode":"human-vs-human"}"#).unwrap();
        assert_eq!(parsed, Settings::two_players());
    }
}
