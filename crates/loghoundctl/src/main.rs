//! Loghound Control - CLI client for the loghound daemon
//!
//! Feeds log files to the daemon and renders the resulting diagnosis.

use anyhow::Result;
use clap::Parser;
use loghoundctl::cli::{Cli, Commands};
use loghoundctl::commands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let addr = cli.addr.as_deref();

    match cli.command {
        Commands::Health => commands::health(addr).await,
        Commands::Analyze {
            file,
            json,
            app,
            env,
        } => commands::analyze(addr, &file, json, app, env).await,
        Commands::AnalyzeDir { dir, out } => commands::analyze_dir(addr, &dir, &out).await,
    }
}
