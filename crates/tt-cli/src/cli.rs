//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lightweight activity tracker.
///
/// Replays a session script against a pausable tracker and prints the
/// resulting action log.
#[derive(Debug, Parser)]
#[command(name = "tt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a session script and print its exports.
    ///
    /// One step per line: `start <label>`, `toggle [label]`, `pause`,
    /// `resume`, `record <label>`, `once <label>`, `wait <ms>`, `elapsed`,
    /// `export`, `stop`. Blank lines and `#` comments are ignored.
    Run {
        /// Script file to read. Reads stdin when omitted or `-`.
        script: Option<PathBuf>,

        /// Field delimiter for exports (overrides config).
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Export as JSON lines instead of delimited text.
        #[arg(long)]
        json: bool,
    },
}
