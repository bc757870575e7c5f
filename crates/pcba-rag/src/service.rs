//! The retrieval service: load, chunk, embed, store, then query.

use tracing::info;

use crate::embeddings::OllamaEmbeddings;
use crate::error::Result;
use crate::loader::MarkdownLoader;
use crate::splitter::TextSplitter;
use crate::store::{NewChunk, ScoredChunk, VectorStore};

/// Collection name the process docs are stored under.
pub const COLLECTION: &str = "pcb_processes";

/// Default number of chunks returned per query.
pub const DEFAULT_K: usize = 2;

/// Chunks embedded per Ollama request.
const EMBED_BATCH: usize = 32;

/// RAG service for retrieving PCB assembly process information.
///
/// Constructed explicitly at startup and injected into the serving layer;
/// there is no lazy global instance.
pub struct ProcessRag {
    store: VectorStore,
    embeddings: OllamaEmbeddings,
    splitter: TextSplitter,
}

impl ProcessRag {
    /// Build the service, ingesting documents when the collection is empty
    /// or `force_reload` is set. An already-populated collection is reused
    /// as-is otherwise.
    pub async fn build(
        loader: &MarkdownLoader,
        embeddings: OllamaEmbeddings,
        store: VectorStore,
        force_reload: bool,
    ) -> Result<Self> {
        let service = Self {
            store,
            embeddings,
            splitter: TextSplitter::default(),
        };

        let existing = service.store.count().await?;
        if existing > 0 && !force_reload {
            info!(
                "Reusing vector collection '{}' ({} chunks)",
                service.store.collection(),
                existing
            );
            return Ok(service);
        }

        service.ingest(loader).await?;
        Ok(service)
    }

    /// (Re)build the collection from the documents directory.
    pub async fn ingest(&self, loader: &MarkdownLoader) -> Result<usize> {
        let documents = loader.load()?;
        info!(
            "Ingesting {} documents from {:?}",
            documents.len(),
            loader.dir()
        );

        let mut pending: Vec<(usize, usize, String)> = Vec::new();
        for (doc_id, doc) in documents.iter().enumerate() {
            for (ordinal, content) in self.splitter.split(&doc.content).into_iter().enumerate() {
                pending.push((doc_id, ordinal, content));
            }
        }

        let mut chunks = Vec::with_capacity(pending.len());
        for batch in pending.chunks(EMBED_BATCH) {
            let texts: Vec<&str> = batch.iter().map(|(_, _, content)| content.as_str()).collect();
            let vectors = self.embeddings.embed_batch(&texts).await?;
            for ((doc_id, ordinal, content), embedding) in batch.iter().zip(vectors) {
                let doc = &documents[*doc_id];
                chunks.push(NewChunk {
                    doc_id: *doc_id,
                    filename: doc.filename.clone(),
                    title: doc.title.clone(),
                    ordinal: *ordinal,
                    content: content.clone(),
                    embedding,
                });
            }
        }

        self.store.clear().await?;
        self.store.insert_chunks(&chunks).await?;
        info!(
            "Stored {} chunks in collection '{}'",
            chunks.len(),
            self.store.collection()
        );
        Ok(chunks.len())
    }

    /// Number of chunks currently stored.
    pub async fn chunk_count(&self) -> Result<usize> {
        self.store.count().await
    }

    /// Retrieve the top-k chunks for a query.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let vector = self.embeddings.embed(query).await?;
        self.store.search(&vector, k).await
    }

    /// Search and format the results for display.
    pub async fn search(&self, query: &str, k: usize) -> Result<String> {
        let hits = self.retrieve(query, k).await?;
        Ok(format_results(&hits))
    }
}

/// Format retrieved chunks for the operator or an agent.
pub fn format_results(chunks: &[ScoredChunk]) -> String {
    if chunks.is_empty() {
        return "No relevant process documentation found.".to_string();
    }

    let mut formatted = String::from("\nInformation\n");
    for chunk in chunks {
        formatted.push_str(&format!("Process: {}\n", chunk.title));
        formatted.push_str(&chunk.content.replace("\n\n", "\n"));
        formatted.push('\n');
    }

    formatted
}
