//! Line-oriented terminal front end.
//!
//! Reads one command per line, forwards it to the controller and
//! prints the board after every change.

use anyhow::{Context, Result};
use noughts_core::{
    Difficulty, GameController, Mark, Mode, MoveError, Outcome, Phase, Position, Session,
    SessionObserver, Settings, StateChange,
};
use rand::Rng;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  0-8 or a square name (e.g. center)   place your mark
  reset                                clear the board (scores are kept)
  mode human-vs-human|human-vs-computer
  difficulty easy|medium|hard
  board                                show the board again
  help                                 show this text
  quit                                 leave the game";

/// One parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place a mark.
    Move(Position),
    /// Clear the board.
    Reset,
    /// Switch game mode.
    Mode(Mode),
    /// Switch computer strength.
    Difficulty(Difficulty),
    /// Print the board.
    Board,
    /// Print the help text.
    Help,
    /// Leave.
    Quit,
}

/// Why a line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum InputError {
    /// Nothing but whitespace.
    #[display("Empty input")]
    Empty,
    /// Neither a command nor a square.
    #[display("Unknown command {:?} (type help)", _0)]
    Unknown(String),
    /// A command argument that is not one of the allowed values.
    #[display("Invalid value {:?} for {}", value, command)]
    InvalidValue {
        /// The command being parsed.
        command: &'static str,
        /// The rejected argument.
        value: String,
    },
}

impl std::error::Error for InputError {}

/// Parses a line of input.
#[instrument]
pub fn parse_input(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Err(InputError::Empty);
    };
    let rest = words.collect::<Vec<_>>().join(" ");

    match first.to_lowercase().as_str() {
        "reset" | "r" => Ok(Input::Reset),
        "board" | "b" => Ok(Input::Board),
        "help" | "h" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        "mode" => Mode::from_str(&rest)
            .map(Input::Mode)
            .map_err(|_| InputError::InvalidValue {
                command: "mode",
                value: rest,
            }),
        "difficulty" => Difficulty::from_str(&rest)
            .map(Input::Difficulty)
            .map_err(|_| InputError::InvalidValue {
                command: "difficulty",
                value: rest,
            }),
        _ => Position::from_label_or_number(line)
            .map(Input::Move)
            .ok_or_else(|| InputError::Unknown(line.trim().to_string())),
    }
}

/// Text cue for a finished game, worded for whoever is at the keyboard.
pub fn outcome_cue(outcome: Outcome, against_computer: bool) -> &'static str {
    match (outcome, against_computer) {
        (Outcome::Won(Mark::X), true) => "You win!",
        (Outcome::Won(Mark::O), true) => "The computer wins.",
        (Outcome::Won(Mark::X), false) => "X wins!",
        (Outcome::Won(Mark::O), false) => "O wins!",
        (Outcome::Draw, _) => "It's a draw.",
        (Outcome::Ongoing, _) => "",
    }
}

/// Observer that announces finished games.
///
/// Stands in for the win, lose and draw sounds of a graphical front end.
#[derive(Debug)]
pub struct Announcer<W> {
    out: W,
    against_computer: bool,
}

impl<W: Write> Announcer<W> {
    /// Creates an announcer for the current settings.
    pub fn new(out: W, settings: Settings) -> Self {
        Self {
            out,
            against_computer: settings.mode.computer_enabled(),
        }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SessionObserver for Announcer<W> {
    fn on_outcome(&mut self, outcome: Outcome) {
        let cue = outcome_cue(outcome, self.against_computer);
        if let Err(e) = writeln!(self.out, "\x07{cue}") {
            warn!(error = %e, "Failed to announce outcome");
        }
    }

    fn on_state_changed(&mut self, _change: StateChange, session: &Session) {
        self.against_computer = session.settings().mode.computer_enabled();
    }
}

/// Renders the board, the score and the prompt line.
pub fn render<R: Rng>(game: &GameController<R>) -> String {
    let tally = game.tally();
    let status = match game.phase() {
        Phase::Terminal => format!("{} - type reset to play again", game.outcome()),
        Phase::AwaitingHumanMove | Phase::ComputerToMove => format!("{} to move", game.turn()),
    };
    format!(
        "{}\n\nX: {}  O: {}  Draws: {}  [{}]\n{}",
        game.session().board().display(),
        tally.x_wins,
        tally.o_wins,
        tally.draws,
        game.settings(),
        status
    )
}

/// Runs the command loop until `quit` or end of input.
#[instrument(skip_all)]
pub fn run<R, I, W>(game: &mut GameController<R>, input: I, out: &mut W) -> Result<()>
where
    R: Rng,
    I: BufRead,
    W: Write,
{
    writeln!(out, "{}\n", HELP).context("Failed to write to terminal")?;
    writeln!(out, "{}", render(game)).context("Failed to write to terminal")?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let command = match parse_input(&line) {
            Ok(command) => command,
            Err(InputError::Empty) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };
        debug!(?command, "Command");

        match command {
            Input::Quit => break,
            Input::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Input::Board => {}
            Input::Reset => game.reset(),
            Input::Mode(mode) => game.configure(Settings::new(mode, game.settings().difficulty)),
            Input::Difficulty(difficulty) => {
                game.configure(Settings::new(game.settings().mode, difficulty))
            }
            Input::Move(pos) => {
                if let Err(e) = game.request_move(pos.to_index()) {
                    writeln!(out, "{}", describe(e))?;
                    continue;
                }
            }
        }
        writeln!(out, "\n{}", render(game))?;
    }

    Ok(())
}

fn describe(error: MoveError) -> String {
    match error {
        MoveError::GameOver => "The game is over - type reset to play again.".to_string(),
        other => other.to_string(),
    }
}
