//! pcba-rag - Retrieval-augmented lookup over PCB process documentation
//!
//! This crate turns a folder of markdown process documents into a queryable
//! vector collection:
//!
//! - **loader**: markdown directory loading with per-document metadata
//! - **splitter**: character-based chunking with overlap
//! - **embeddings**: Ollama embedding client and similarity helpers
//! - **store**: SQLite-backed vector collection
//! - **service**: the `ProcessRag` service wiring the pieces together

pub mod embeddings;
pub mod error;
pub mod loader;
pub mod service;
pub mod splitter;
pub mod store;

// Re-export commonly used types
pub use embeddings::OllamaEmbeddings;
pub use error::{RagError, Result};
pub use loader::{MarkdownLoader, SourceDocument};
pub use service::{COLLECTION, DEFAULT_K, ProcessRag, format_results};
pub use splitter::TextSplitter;
pub use store::{NewChunk, ScoredChunk, VectorStore};
