//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Game server log analyzer.
///
/// Reconstructs matches from a server log and reports per-player kill and
/// death statistics.
#[derive(Debug, Parser)]
#[command(name = "ql", version, about, long_about = None)]
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
    /// Print a report for every game found in the given logs.
    Report {
        /// Log files to analyze. Each file is scanned independently.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print reports as JSON.
        #[arg(long)]
        json: bool,

        /// Print human-readable reports.
        #[arg(long)]
        human: bool,
    },

    /// Dump every parsable log line as a JSON event.
    Events {
        /// Log file to tokenize.
        file: PathBuf,
    },
}
