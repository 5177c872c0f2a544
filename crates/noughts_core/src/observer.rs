//! Hooks for the presentation and persistence layers.

use crate::session::Session;
use crate::Outcome;

/// Which kind of operation changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum StateChange {
    /// A move cycle was applied (the human move plus any computer reply).
    Moved,
    /// The board was cleared by [`crate::GameController::reset`].
    Reset,
    /// Mode or difficulty changed; the board was cleared too.
    Configured,
}

/// Receives notifications after the controller mutates the session.
///
/// Both methods default to doing nothing so an observer only
/// implements what it cares about.
pub trait SessionObserver {
    /// Called once when a game ends, after the tally has been updated.
    fn on_outcome(&mut self, _outcome: Outcome) {}

    /// Called after every operation that changed the session.
    fn on_state_changed(&mut self, _change: StateChange, _session: &Session) {}
}
