//! Persistence seam: where saved sessions come from and go to.

use crate::observer::{SessionObserver, StateChange};
use crate::session::Session;
use crate::snapshot::SavedSession;
use derive_more::{Display, Error};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, instrument, warn};

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

/// Durable home for one saved session.
///
/// The store only moves [`SavedSession`] values around; validating what
/// it returns is the controller's job.
pub trait SessionStore {
    /// Returns the saved session, or `None` if nothing was saved.
    fn load(&self) -> Result<Option<SavedSession>, StoreError>;

    /// Overwrites the saved session.
    fn save(&self, saved: &SavedSession) -> Result<(), StoreError>;

    /// Forgets the saved session.
    fn clear(&self) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn load(&self) -> Result<Option<SavedSession>, StoreError> {
        (**self).load()
    }

    fn save(&self, saved: &SavedSession) -> Result<(), StoreError> {
        (**self).save(saved)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// In-memory store holding the session as JSON text.
///
/// Keeps the text rather than the struct so loading goes through the
/// same parse path as a file would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with raw JSON text.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: RefCell::new(Some(json.into())),
        }
    }

    /// Returns the stored JSON text, if any.
    pub fn json(&self) -> Option<String> {
        self.json.borrow().clone()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<SavedSession>, StoreError> {
        self.json
            .borrow()
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&self, saved: &SavedSession) -> Result<(), StoreError> {
        *self.json.borrow_mut() = Some(serde_json::to_string(saved)?);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.json.borrow_mut().take();
        Ok(())
    }
}

/// Observer that keeps a store in step with the session.
///
/// Saves after moves and configuration changes; a reset clears the
/// store so the next launch starts fresh. Failures are logged and
/// otherwise ignored.
#[derive(Debug)]
pub struct AutoSave<S> {
    store: S,
}

impl<S: SessionStore> AutoSave<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: SessionStore> SessionObserver for AutoSave<S> {
    #[instrument(skip(self, session))]
    fn on_state_changed(&mut self, change: StateChange, session: &Session) {
        let result = match change {
            StateChange::Reset => self.store.clear(),
            StateChange::Moved | StateChange::Configured => {
                self.store.save(&SavedSession::from(session))
            }
        };
        match result {
            Ok(()) => debug!(%change, "Store updated"),
            Err(e) => warn!(%change, error = %e, "Failed to update store"),
        }
    }
}
