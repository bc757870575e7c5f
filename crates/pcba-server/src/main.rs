//! pcba-server - MCP bridge for the PCBA line orchestrator
//!
//! Serves the sequence tools and the documentation lookup over stdio.

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pcba_rag::{COLLECTION, MarkdownLoader, OllamaEmbeddings, ProcessRag, VectorStore};

mod config;
mod mcp;
mod state;

use mcp::McpServer;
use state::AppState;

/// PCBA line MCP server
#[derive(Parser, Debug)]
#[command(name = "pcba-server", version, about)]
struct Args {
    /// Reload documents and rebuild the vector collection
    #[arg(long)]
    force_reload: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the MCP transport
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("pcba_server=info".parse()?))
        .init();

    let args = Args::parse();

    info!("pcba-server v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load()?;
    info!("Data directory: {:?}", config.data_dir);

    // Everything is constructed before serving starts, so no tool call can
    // race initialization.
    let rag = match &config.docs_dir {
        Some(docs_dir) => {
            let loader = MarkdownLoader::new(docs_dir)?;
            let embeddings =
                OllamaEmbeddings::new(&config.ollama_base_url, &config.embedding_model);
            let store = VectorStore::open(&config.database_path, COLLECTION)?;
            Some(ProcessRag::build(&loader, embeddings, store, args.force_reload).await?)
        }
        None => {
            info!("No documents directory configured, documentation tools disabled");
            None
        }
    };

    let state = AppState::new(config, rag);
    info!("Serving MCP over stdio");

    let service = McpServer::new(state).serve(stdio()).await?;
    service.waiting().await?;

    info!("Shutting down");
    Ok(())
}
