//! pcba - Operator CLI for the PCBA line
//!
//! Edit the 5-slot assembly sequence, validate it against the known-good
//! patterns, and query the process documentation.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod commands;
mod config;
mod state;

use cli::{Cli, Commands, RagAction};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("pcba=warn".parse()?))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::load()?;
    config.ensure_dirs()?;

    // Execute command
    match cli.command {
        Commands::Status { json } => commands::line::status(json, &config),
        Commands::SetBlock { pos, block } => commands::line::set_block(pos, &block, &config),
        Commands::SetParam { pos, value } => commands::line::set_param(pos, &value, &config),
        Commands::Recipe { number } => commands::line::recipe(number, &config),
        Commands::Execute => commands::line::execute(&config),
        Commands::Recipes => commands::line::recipes(),
        Commands::Catalog => commands::line::catalog(),
        Commands::Rag(cmd) => match cmd.action {
            RagAction::Ingest { force } => commands::rag::ingest(force, &config).await,
            RagAction::Search { query, k } => commands::rag::search(&query, k, &config).await,
        },
        Commands::Version => {
            println!("pcba {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
