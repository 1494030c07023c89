//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    version,
    about = "Student record manager with flat-file and SQLite backends"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to config file (default: <root>/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend: text or sqlite (overrides config)
    #[arg(long, global = true)]
    pub backend: Option<String>,
}
