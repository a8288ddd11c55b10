//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap.
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Loghound CLI
#[derive(Parser)]
#[command(name = "loghoundctl")]
#[command(about = "Loghound - log triage client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Daemon address (overrides $LOGHOUND_ADDR and the default)
    #[arg(long, global = true)]
    pub addr: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check daemon health
    Health,

    /// Analyze a single log file
    Analyze {
        /// Path to a log file
        file: PathBuf,

        /// Print raw JSON instead of the formatted report
        #[arg(long)]
        json: bool,

        /// Application name to attach to the request
        #[arg(long)]
        app: Option<String>,

        /// Environment to attach to the request (e.g. "prod")
        #[arg(long)]
        env: Option<String>,
    },

    /// Analyze every .log/.txt file in a directory and write reports
    AnalyzeDir {
        /// Directory containing log files
        dir: PathBuf,

        /// Directory to save analysis reports
        #[arg(long, default_value = "reports")]
        out: PathBuf,
    },
}
