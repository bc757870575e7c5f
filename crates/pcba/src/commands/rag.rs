//! Documentation index commands.

use anyhow::Result;
use colored::Colorize;

use pcba_rag::{COLLECTION, MarkdownLoader, OllamaEmbeddings, ProcessRag, VectorStore};

use crate::config::Config;

fn embeddings(config: &Config) -> OllamaEmbeddings {
    OllamaEmbeddings::new(&config.rag.ollama_url, &config.rag.embedding_model)
}

pub async fn ingest(force: bool, config: &Config) -> Result<()> {
    let loader = MarkdownLoader::new(&config.rag.docs_dir)?;
    let store = VectorStore::open(&config.database_path(), COLLECTION)?;

    let existing = store.count().await?;
    if existing > 0 && !force {
        println!("Collection already has {existing} chunks. Use --force to rebuild.");
        return Ok(());
    }

    let service = ProcessRag::build(&loader, embeddings(config), store, true).await?;
    let count = service.chunk_count().await?;

    println!(
        "{}",
        format!("✓ Documentation index built ({count} chunks)")
            .green()
            .bold()
    );
    Ok(())
}

pub async fn search(query: &str, k: usize, config: &Config) -> Result<()> {
    let loader = MarkdownLoader::new(&config.rag.docs_dir)?;
    let store = VectorStore::open(&config.database_path(), COLLECTION)?;

    let service = ProcessRag::build(&loader, embeddings(config), store, false).await?;
    let result = service.search(query, k).await?;
    println!("{result}");
    Ok(())
}
