//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::{Difficulty, Mode, Settings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "noughts.toml";

/// Settings read from `noughts.toml`.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Game mode for a fresh session.
    #[serde(default)]
    mode: Mode,

    /// Computer strength for a fresh session.
    #[serde(default)]
    difficulty: Difficulty,

    /// Where the session is saved between runs.
    #[serde(default = "default_save_path")]
    save_path: PathBuf,

    /// Whether to save after every move.
    #[serde(default = "default_autosave")]
    autosave: bool,
}

fn default_save_path() -> PathBuf {
    PathBuf::from("noughts_save.json")
}

fn default_autosave() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            difficulty: Difficulty::default(),
            save_path: default_save_path(),
            autosave: default_autosave(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = %config.mode, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the explicit config file, or `noughts.toml` if it exists.
    ///
    /// An explicit path must exist; the default file is optional.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Mode and difficulty as core settings.
    pub fn settings(&self) -> Settings {
        Settings::new(self.mode, self.difficulty)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        mode: Option<Mode>,
        difficulty: Option<Difficulty>,
        save_path: Option<PathBuf>,
    ) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        if let Some(save_path) = save_path {
            self.save_path = save_path;
        }
        self
    }

    /// Turns saving off.
    pub fn without_autosave(mut self) -> Self {
        self.autosave = false;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
