//! focusd - a small focus timer web application.
//!
//! Tracks focus sessions in memory and reports simple statistics.
//!
//! Architecture:
//! - `focusd serve` runs the web server, which owns the only session store
//! - Other subcommands are thin clients that talk to the server via HTTP
//! - Nothing is persisted; history lasts as long as the server process

mod assets;
mod cli;
mod config;
mod error;
mod logging;
mod models;
mod server;
mod stats;
mod store;

use anyhow::Result;
use clap::Parser;

use cli::{execute, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);
    execute(cli).await
}
