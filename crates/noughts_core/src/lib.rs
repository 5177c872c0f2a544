//! Tic-tac-toe engine with a computer opponent.
//!
//! # Architecture
//!
//! - **Board**: nine squares, written once each per game
//! - **Rules**: pure outcome evaluation over any board
//! - **Search**: exhaustive minimax for the hard opponent
//! - **Heuristics**: random and rule-based opponents for easy and medium
//! - **Controller**: owns the session, applies moves, asks the computer
//!   for replies and notifies observers
//!
//! Rendering, input and storage live outside this crate; they plug in
//! through [`SessionObserver`] and [`SessionStore`].
//!
//! # Example
//!
//! ```
//! use noughts_core::{Difficulty, GameController, Outcome, Settings};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let settings = Settings::versus_computer(Difficulty::Hard);
//! let mut game = GameController::with_rng(settings, StdRng::seed_from_u64(0));
//! assert_eq!(game.request_move(4), Ok(Outcome::Ongoing));
//! // The computer has already answered with a corner.
//! assert_eq!(game.board_snapshot().iter().filter(|sq| sq.mark().is_some()).count(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod controller;
mod error;
mod observer;
mod position;
mod session;
mod settings;
mod snapshot;
mod store;
mod types;

// Public modules of free functions
pub mod heuristics;
pub mod rules;
pub mod search;

// Crate-level exports - Board and domain types
pub use error::MoveError;
pub use position::Position;
pub use types::{Board, Mark, Outcome, Square, Tally};

// Crate-level exports - Settings
pub use settings::{Difficulty, Mode, Settings};

// Crate-level exports - Session and controller
pub use controller::{COMPUTER, GameController, HUMAN};
pub use session::{Phase, Session};

// Crate-level exports - Collaborator seams
pub use observer::{SessionObserver, StateChange};
pub use snapshot::{SavedSession, SnapshotError};
pub use store::{AutoSave, MemoryStore, SessionStore, StoreError};
