//! Command-line interface for noughts.

use clap::{Args, Parser, Subcommand};
use noughts_core::{Difficulty, Mode};
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./noughts.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal, resuming the saved session if there is one
    Play(PlayArgs),

    /// Print the saved session
    ShowSave {
        /// Save file to read (overrides the config file)
        #[arg(long)]
        save_file: Option<PathBuf>,
    },

    /// Delete the saved session, starting the next game from scratch
    ClearSave {
        /// Save file to delete (overrides the config file)
        #[arg(long)]
        save_file: Option<PathBuf>,
    },
}

/// Options for the `play` command.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Game mode: human-vs-human (pvp) or human-vs-computer (pvc)
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Computer strength: easy, medium or hard
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Save file (overrides the config file)
    #[arg(long)]
    pub save_file: Option<PathBuf>,

    /// Neither load nor save the session
    #[arg(long)]
    pub no_save: bool,

    /// Seed for the easy and medium opponents
    #[arg(long)]
    pub seed: Option<u64>,
}
