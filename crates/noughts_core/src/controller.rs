//! The game session controller.
//!
//! Owns the [`Session`], validates and applies human moves, lets the
//! computer answer in human-vs-computer mode and tells observers what
//! happened. A human move and the computer reply it triggers form one
//! cycle: observers hear about it once, after both moves.

use crate::error::MoveError;
use crate::observer::{SessionObserver, StateChange};
use crate::session::{Phase, Session};
use crate::settings::Settings;
use crate::store::SessionStore;
use crate::{Mark, Outcome, Position, Square, Tally};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

/// Mark played by the human (or the first human).
pub const HUMAN: Mark = Mark::X;

/// Mark played by the computer in human-vs-computer mode.
pub const COMPUTER: Mark = Mark::O;

/// Drives a tic-tac-toe session.
///
/// Generic over the random source used by the easy and medium
/// opponents so tests can seed it.
pub struct GameController<R = StdRng> {
    session: Session,
    rng: R,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl GameController<StdRng> {
    /// Creates a controller with an empty board and an OS-seeded RNG.
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }
}

impl<R: Rng> GameController<R> {
    /// Creates a controller with an empty board and the given RNG.
    #[instrument(skip(rng))]
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        info!(%settings, "Creating game controller");
        Self::from_session(Session::new(settings), rng)
    }

    /// Resumes the session held by `store`, or starts fresh.
    ///
    /// A store failure or a saved session that does not validate is
    /// logged and treated as if nothing had been saved; `fallback`
    /// then provides the settings.
    #[instrument(skip(store, rng))]
    pub fn restore(store: &dyn SessionStore, fallback: Settings, rng: R) -> Self {
        let session = match store.load() {
            Ok(Some(saved)) => match Session::try_from(saved) {
                Ok(session) => {
                    info!(
                        settings = %session.settings(),
                        outcome = %session.outcome(),
                        "Restored saved session"
                    );
                    Some(session)
                }
                Err(e) => {
                    warn!(error = %e, "Discarding invalid saved session");
                    None
                }
            },
            Ok(None) => {
                debug!("No saved session");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to load saved session");
                None
            }
        };

        match session {
            Some(session) => Self::from_session(session, rng),
            None => Self::with_rng(fallback, rng),
        }
    }

    fn from_session(session: Session, rng: R) -> Self {
        Self {
            session,
            rng,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for outcomes and state changes.
    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Applies a human move at `index` (0-8).
    ///
    /// In human-vs-computer mode the computer replies before this
    /// returns. The returned outcome is the one after the whole cycle.
    /// A rejected move changes nothing and notifies nobody.
    #[instrument(skip(self), fields(turn = %self.session.turn()))]
    pub fn request_move(&mut self, index: usize) -> Result<Outcome, MoveError> {
        let pos = Position::from_index(index).ok_or_else(|| {
            warn!(index, "Move out of range");
            MoveError::OutOfRange(index)
        })?;

        if self.session.phase() == Phase::Terminal {
            warn!(position = %pos, "Move after game over");
            return Err(MoveError::GameOver);
        }

        let mark = *self.session.turn();
        let mut outcome = self.session.place(pos, mark).map_err(|e| {
            warn!(position = %pos, error = %e, "Move rejected");
            e
        })?;
        info!(%mark, position = %pos, %outcome, "Move applied");

        // The mover keeps the turn once the game is over.
        if !outcome.is_terminal() {
            self.session.set_turn(mark.opponent());
            if self.session.settings().mode.computer_enabled() {
                outcome = self.computer_turn();
            }
        }

        if outcome.is_terminal() {
            self.finish(outcome);
        }
        self.notify(StateChange::Moved);
        Ok(outcome)
    }

    /// Lets the configured policy move for the computer.
    fn computer_turn(&mut self) -> Outcome {
        let difficulty = self.session.settings().difficulty;
        debug!(phase = %Phase::ComputerToMove, %difficulty, "Computer to move");

        let choice = difficulty.choose_move(self.session.board(), COMPUTER, &mut self.rng);
        let outcome = match choice {
            Some(pos) => match self.session.place(pos, COMPUTER) {
                Ok(outcome) => {
                    info!(mark = %COMPUTER, position = %pos, %outcome, "Computer moved");
                    outcome
                }
                Err(e) => {
                    warn!(position = %pos, error = %e, "Computer chose an occupied square");
                    self.session.outcome()
                }
            },
            None => {
                warn!("Computer found no empty square");
                self.session.outcome()
            }
        };

        self.session.set_turn(HUMAN);
        outcome
    }

    /// Records a finished game and reports it.
    fn finish(&mut self, outcome: Outcome) {
        self.session.record(outcome);
        info!(%outcome, tally = ?self.session.tally(), "Game over");
        for observer in &mut self.observers {
            observer.on_outcome(outcome);
        }
    }

    /// Clears the board and gives X the move. The tally is kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.session.start_game();
        info!("Game reset");
        self.notify(StateChange::Reset);
    }

    /// Switches mode and difficulty, then clears the board.
    #[instrument(skip(self))]
    pub fn configure(&mut self, settings: Settings) {
        self.session.set_settings(settings);
        self.session.start_game();
        info!(%settings, "Settings changed");
        self.notify(StateChange::Configured);
    }

    fn notify(&mut self, change: StateChange) {
        for observer in &mut self.observers {
            observer.on_state_changed(change, &self.session);
        }
    }

    /// The nine squares in row-major order.
    pub fn board_snapshot(&self) -> [Square; 9] {
        *self.session.board().squares()
    }

    /// Finished games so far.
    pub fn tally(&self) -> Tally {
        *self.session.tally()
    }

    /// Outcome of the current board.
    pub fn outcome(&self) -> Outcome {
        self.session.outcome()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Mark that moves next.
    pub fn turn(&self) -> Mark {
        *self.session.turn()
    }

    /// Current mode and difficulty.
    pub fn settings(&self) -> Settings {
        *self.session.settings()
    }

    /// The whole session, read-only.
    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl<R> std::fmt::Debug for GameController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("session", &self.session)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        outcomes: Rc<RefCell<Vec<Outcome>>>,
        changes: Rc<RefCell<Vec<StateChange>>>,
    }

    impl SessionObserver for Recorder {
        fn on_outcome(&mut self, outcome: Outcome) {
            self.outcomes.borrow_mut().push(outcome);
        }

        fn on_state_changed(&mut self, change: StateChange, _session: &Session) {
            self.changes.borrow_mut().push(change);
        }
    }

    fn seeded(settings: Settings) -> GameController<StdRng> {
        GameController::with_rng(settings, StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_two_players_alternate() {
        let mut game = seeded(Settings::two_players());
        assert_eq!(game.request_move(4), Ok(Outcome::Ongoing));
        assert_eq!(game.turn(), Mark::O);
        assert_eq!(game.request_move(0), Ok(Outcome::Ongoing));
        assert_eq!(game.turn(), Mark::X);
        assert_eq!(game.board_snapshot()[0], Square::Occupied(Mark::O));
    }

    #[test]
    fn test_computer_replies_and_hands_back() {
        let mut game = seeded(Settings::versus_computer(Difficulty::Medium));
        assert_eq!(game.request_move(0), Ok(Outcome::Ongoing));
        assert_eq!(game.board_snapshot()[4], Square::Occupied(COMPUTER));
        assert_eq!(game.turn(), HUMAN);
        assert_eq!(game.phase(), Phase::AwaitingHumanMove);
    }

    #[test]
    fn test_observers_see_one_change_per_cycle() {
        let recorder = Recorder::default();
        let changes = Rc::clone(&recorder.changes);
        let outcomes = Rc::clone(&recorder.outcomes);

        let mut game = seeded(Settings::versus_computer(Difficulty::Hard));
        game.subscribe(Box::new(recorder));
        game.request_move(4).unwrap();
        assert_eq!(*changes.borrow(), vec![StateChange::Moved]);
        assert!(outcomes.borrow().is_empty());

        assert_eq!(game.request_move(4), Err(MoveError::SquareOccupied(Position::Center)));
        assert_eq!(changes.borrow().len(), 1);

        game.reset();
        game.configure(Settings::two_players());
        assert_eq!(
            *changes.borrow(),
            vec![StateChange::Moved, StateChange::Reset, StateChange::Configured]
        );
    }

    #[test]
    fn test_outcome_reported_once_per_game() {
        let recorder = Recorder::default();
        let outcomes = Rc::clone(&recorder.outcomes);

        let mut game = seeded(Settings::two_players());
        game.subscribe(Box::new(recorder));
        for index in [0, 3, 1, 4, 2] {
            game.request_move(index).unwrap();
        }
        assert_eq!(game.request_move(8), Err(MoveError::GameOver));
        assert_eq!(*outcomes.borrow(), vec![Outcome::Won(Mark::X)]);
        assert_eq!(game.tally(), Tally::new(1, 0, 0));
    }

    #[test]
    fn test_out_of_range() {
        let mut game = seeded(Settings::two_players());
        assert_eq!(game.request_move(9), Err(MoveError::OutOfRange(9)));
        assert_eq!(game.board_snapshot(), [Square::Empty; 9]);
    }
}
