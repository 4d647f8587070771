//! Binary entry point for chessmaker.
//!
//! Opens the document store and runs the interactive screens on the
//! terminal.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use chessmaker::cli::{self, AppContext, HOME};
use chessmaker::config::{CONFIG_PATH_ENV, ChessmakerConfig};
use chessmaker::observability;
use chessmaker::storage::{DocumentStore, JsonFileStore, MemoryStore};
use chessmaker::ui::TerminalConsole;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// `--db` value selecting a throwaway in-memory store.
const IN_MEMORY: &str = ":memory:";

/// Chessmaker - chess tournament bookkeeping in the terminal.
#[derive(Parser)]
#[command(name = "chessmaker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document file, or `:memory:` for a store that is never written.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Route to open first.
    #[arg(long, default_value = HOME)]
    start: String,

    /// Never clear the terminal between screens.
    #[arg(long)]
    no_clear: bool,
}

/// Main entry point.
fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Session failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Opens the store and runs the route loop until the operator quits.
fn run(cli: Cli, config: ChessmakerConfig) -> anyhow::Result<()> {
    let data_file = cli.db.unwrap_or(config.data_file);
    let store = open_store(&data_file)?;

    let console = TerminalConsole::stdio().with_clear_screen(config.clear_screen && !cli.no_clear);
    let mut ctx = AppContext::open(store, console)
        .with_context(|| format!("loading {}", data_file.display()))?;
    tracing::info!(
        data_file = %data_file.display(),
        players = ctx.players.len(),
        tournaments = ctx.tournaments.len(),
        "Session started"
    );

    cli::routes()
        .navigate(&mut ctx, &cli.start)
        .with_context(|| format!("navigating from {}", cli.start))?;

    tracing::info!("Session ended");
    Ok(())
}

fn open_store(data_file: &Path) -> anyhow::Result<Arc<dyn DocumentStore>> {
    if data_file == Path::new(IN_MEMORY) {
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = JsonFileStore::open(data_file)
        .with_context(|| format!("opening {}", data_file.display()))?;
    Ok(Arc::new(store))
}

/// Loads configuration.
///
/// Order: `--config`, `CHESSMAKER_CONFIG_PATH`, the platform config
/// directory, defaults. Environment overrides apply on top.
fn load_config(path: Option<&Path>) -> chessmaker::Result<ChessmakerConfig> {
    let config = if let Some(config_path) = path {
        ChessmakerConfig::load_from_file(config_path)?
    } else {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(config_path) if !config_path.trim().is_empty() => {
                ChessmakerConfig::load_from_file(Path::new(&config_path))?
            },
            _ => ChessmakerConfig::load_default(),
        }
    };
    Ok(config.with_env_overrides())
}
