//! Terminal front end for the noughts engine.
//!
//! - **Config**: TOML settings with command-line overrides
//! - **File store**: the session saved as JSON between runs
//! - **Terminal**: the line-oriented command loop and outcome cues

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod file_store;
mod terminal;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE};

// Crate-level exports - Persistence
pub use file_store::JsonFileStore;

// Crate-level exports - Terminal
pub use terminal::{outcome_cue, parse_input, render, run, Announcer, Input, InputError, HELP};
