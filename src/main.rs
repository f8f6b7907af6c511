//! Strictly Rounds - command-line driver
//!
//! Plays a session against the engine from stdin commands.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use strictly_rounds::{EngineConfig, SessionEngine, SessionId, SessionStatus};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    match cli.command {
        Command::Play {
            first,
            second,
            solo,
            rounds,
            opponent,
            seed,
        } => {
            let config = match opponent {
                Some(kind) => config.with_opponent(kind),
                None => config,
            };
            let config = match seed {
                Some(seed) => config.with_seed(seed),
                None => config,
            };
            let rounds = rounds.unwrap_or(*config.default_round_count());
            play(config, &first, second.as_deref().unwrap_or_default(), solo, rounds)
        }
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[instrument]
fn load_config(path: Option<PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_file(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            Ok(config)
        }
        None => {
            info!("No config file given, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Cell(usize),
    Show,
    Restart,
    Void,
    Quit,
}

impl Input {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "show" => Some(Input::Show),
            "restart" => Some(Input::Restart),
            "void" => Some(Input::Void),
            "quit" | "exit" => Some(Input::Quit),
            other => other.parse().ok().map(Input::Cell),
        }
    }
}

#[instrument(skip(config))]
fn play(config: EngineConfig, first: &str, second: &str, solo: bool, rounds: usize) -> Result<()> {
    let engine = SessionEngine::in_memory(config);
    let session = engine.create_session(solo, first, second, rounds)?;
    let id = session
        .id()
        .context("store returned a session without an id")?;
    info!(session_id = id, "Session ready");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_state(&engine, id, &mut out)?;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let result = match Input::parse(&line) {
            Some(Input::Cell(cell)) => engine.make_move(id, cell).map(|_| ()),
            Some(Input::Restart) => engine.restart_session(id).map(|_| ()),
            Some(Input::Void) => engine.void_session(id).map(|_| ()),
            Some(Input::Show) => Ok(()),
            Some(Input::Quit) => break,
            None => {
                warn!(input = %line, "Unrecognized command");
                writeln!(out, "expected a cell (0-8), show, restart, void or quit")?;
                continue;
            }
        };

        if let Err(e) = result {
            writeln!(out, "error: {}", e.kind())?;
            continue;
        }
        print_state(&engine, id, &mut out)?;
    }

    Ok(())
}

fn print_state(engine: &SessionEngine, id: SessionId, out: &mut impl Write) -> Result<()> {
    let session = engine.session(id)?;
    let json = if *session.status() == SessionStatus::Playing {
        serde_json::to_string_pretty(&engine.session_view(id)?)?
    } else {
        serde_json::to_string_pretty(&session)?
    };
    writeln!(out, "{}", json)?;
    Ok(())
}
