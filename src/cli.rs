//! Command-line interface for strictly_rounds.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_rounds::OpponentKind;

/// Strictly Rounds - multi-round tic-tac-toe sessions
#[derive(Parser, Debug)]
#[command(name = "strictly_rounds")]
#[command(about = "Multi-round tic-tac-toe session engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the engine config (TOML). Falls back to STRICTLY_ROUNDS_CONFIG.
    #[arg(long, global = true, env = "STRICTLY_ROUNDS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a session, reading commands from stdin
    ///
    /// Each line is a cell index (0-8), `show`, `restart`, `void` or `quit`.
    Play {
        /// Name of the first participant (opens every round)
        #[arg(long)]
        first: String,

        /// Name of the second participant
        #[arg(long, required_unless_present = "solo", conflicts_with = "solo")]
        second: Option<String>,

        /// Play against the scripted opponent
        #[arg(long)]
        solo: bool,

        /// Number of rounds (defaults to the configured value)
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Opponent policy override
        #[arg(long)]
        opponent: Option<OpponentKind>,

        /// Seed for the random opponent
        #[arg(long)]
        seed: Option<u64>,
    },
}
