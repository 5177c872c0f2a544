//! Noughts - tic-tac-toe in the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use noughts::{AppConfig, Announcer, JsonFileStore};
use noughts_core::{AutoSave, GameController, SessionStore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Play(args) => run_play(config, args),
        Command::ShowSave { save_file } => run_show_save(&save_path(&config, save_file)),
        Command::ClearSave { save_file } => run_clear_save(&save_path(&config, save_file)),
    }
}

fn save_path(config: &AppConfig, save_file: Option<PathBuf>) -> PathBuf {
    save_file.unwrap_or_else(|| config.save_path().clone())
}

/// Play in the terminal
#[instrument(skip_all)]
fn run_play(config: AppConfig, args: PlayArgs) -> Result<()> {
    let mut config = config.with_overrides(args.mode, args.difficulty, args.save_file);
    if args.no_save {
        config = config.without_autosave();
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut game = if *config.autosave() {
        let store = JsonFileStore::new(config.save_path());
        let mut game = GameController::restore(&store, config.settings(), rng);
        game.subscribe(Box::new(AutoSave::new(store)));
        game
    } else {
        GameController::with_rng(config.settings(), rng)
    };
    game.subscribe(Box::new(Announcer::new(std::io::stdout(), game.settings())));

    info!(settings = %game.settings(), autosave = *config.autosave(), "Starting game");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    noughts::run(&mut game, stdin.lock(), &mut stdout)?;

    info!(tally = ?game.tally(), "Game closed");
    Ok(())
}

/// Print the saved session
#[instrument]
fn run_show_save(path: &Path) -> Result<()> {
    let store = JsonFileStore::new(path);
    match store.load().context("Failed to read save file")? {
        Some(saved) => {
            let json = serde_json::to_string_pretty(&saved)?;
            println!("{}", json);
        }
        None => println!("No saved session at {}", path.display()),
    }
    Ok(())
}

/// Delete the saved session
#[instrument]
fn run_clear_save(path: &Path) -> Result<()> {
    JsonFileStore::new(path)
        .clear()
        .context("Failed to delete save file")?;
    println!("Cleared {}", path.display());
    Ok(())
}
