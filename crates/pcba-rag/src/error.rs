//! Error types for pcba-rag.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using pcba-rag RagError
pub type Result<T> = std::result::Result<T, RagError>;

/// Errors raised while building or querying the documentation index.
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Documents directory does not exist: {0}")]
    DocumentsDirMissing(PathBuf),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
