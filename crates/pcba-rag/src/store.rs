//! SQLite-backed vector store.
//!
//! One row per chunk; embeddings are stored as little-endian f32 blobs.
//! Retrieval is a linear cosine scan over the collection.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use rusqlite::{Connection, params};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::embeddings::OllamaEmbeddings;
use crate::error::Result;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS rag_chunks (
    id TEXT PRIMARY KEY,
    collection TEXT NOT NULL,
    doc_id INTEGER NOT NULL,
    filename TEXT NOT NULL,
    title TEXT NOT NULL,
    ordinal INTEGER NOT NULL,
    content TEXT NOT NULL,
    content_hash TEXT NOT NULL,
    embedding BLOB NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_rag_chunks_collection ON rag_chunks (collection);
";

/// A chunk ready for insertion.
#[derive(Debug, Clone)]
pub struct NewChunk {
    pub doc_id: usize,
    pub filename: String,
    pub title: String,
    /// Position of the chunk within its source document.
    pub ordinal: usize,
    pub content: String,
    pub embedding: Vec<f32>,
}

/// A retrieved chunk with its relevance score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub filename: String,
    pub title: String,
    pub content: String,
    pub score: f32,
}

/// Persisted vector collection for document chunks.
pub struct VectorStore {
    db: Arc<Mutex<Connection>>,
    collection: String,
}

impl VectorStore {
    /// Open (and migrate) a store at `path`.
    pub fn open(path: &Path, collection: impl Into<String>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, collection)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory(collection: impl Into<String>) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, collection)
    }

    fn with_connection(conn: Connection, collection: impl Into<String>) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
            collection: collection.into(),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Number of chunks stored under this collection.
    pub async fn count(&self) -> Result<usize> {
        let db = self.db.lock().await;
        let count: usize = db.query_row(
            "SELECT COUNT(*) FROM rag_chunks WHERE collection = ?1",
            params![self.collection],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Remove every chunk in this collection.
    pub async fn clear(&self) -> Result<()> {
        let db = self.db.lock().await;
        let removed = db.execute(
            "DELETE FROM rag_chunks WHERE collection = ?1",
            params![self.collection],
        )?;
        debug!("Cleared {} chunks from '{}'", removed, self.collection);
        Ok(())
    }

    /// Insert chunks in one transaction.
    pub async fn insert_chunks(&self, chunks: &[NewChunk]) -> Result<()> {
        let mut db = self.db.lock().await;
        let tx = db.transaction()?;
        let now = Utc::now().timestamp_millis();

        for chunk in chunks {
            tx.execute(
                "INSERT INTO rag_chunks (id, collection, doc_id, filename, title, ordinal, content, content_hash, embedding, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    Uuid::new_v4().to_string(),
                    &self.collection,
                    chunk.doc_id,
                    &chunk.filename,
                    &chunk.title,
                    chunk.ordinal,
                    &chunk.content,
                    Self::hash_content(&chunk.content),
                    encode_embedding(&chunk.embedding),
                    now,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Rank the collection against a query vector and return the top `k`.
    pub async fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let db = self.db.lock().await;
        let mut stmt = db.prepare(
            "SELECT filename, title, content, embedding FROM rag_chunks WHERE collection = ?1 ORDER BY doc_id, ordinal",
        )?;

        let rows = stmt.query_map(params![self.collection], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Vec<u8>>(3)?,
            ))
        })?;

        let mut scored = Vec::new();
        for row in rows {
            let (filename, title, content, blob) = row?;
            let embedding = decode_embedding(&blob);
            let score = OllamaEmbeddings::cosine_similarity(query, &embedding);
            scored.push(ScoredChunk {
                filename,
                title,
                content,
                score,
            });
        }

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        Ok(scored)
    }

    /// SHA-256 hex digest of chunk content.
    pub fn hash_content(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn encode_embedding(vector: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vector.len() * 4);
    for value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

fn decode_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(doc_id: usize, content: &str, embedding: Vec<f32>) -> NewChunk {
        NewChunk {
            doc_id,
            filename: format!("doc{doc_id}"),
            title: format!("Process {doc_id}"),
            ordinal: 0,
            content: content.to_string(),
            embedding,
        }
    }

    #[test]
    fn test_embedding_blob_round_trip() {
        let vector = vec![0.25_f32, -1.5, 0.0, 3.125];
        let decoded = decode_embedding(&encode_embedding(&vector));
        assert_eq!(decoded, vector);
    }

    #[test]
    fn test_hash_content_is_stable() {
        let a = VectorStore::hash_content("reflow profile");
        let b = VectorStore::hash_content("reflow profile");
        let c = VectorStore::hash_content("wave profile");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[tokio::test]
    async fn test_count_clear_and_insert() {
        let store = VectorStore::open_in_memory("pcb_processes").unwrap();
        assert_eq!(store.count().await.unwrap(), 0);

        store
            .insert_chunks(&[
                chunk(0, "solder paste", vec![1.0, 0.0]),
                chunk(1, "inspection", vec![0.0, 1.0]),
            ])
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 2);

        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_ranks_by_cosine_similarity() {
        let store = VectorStore::open_in_memory("pcb_processes").unwrap();
        store
            .insert_chunks(&[
                chunk(0, "about soldering", vec![1.0, 0.0, 0.0]),
                chunk(1, "about placement", vec![0.0, 1.0, 0.0]),
                chunk(2, "about testing", vec![0.7, 0.7, 0.0]),
            ])
            .await
            .unwrap();

        let hits = store.search(&[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].content, "about soldering");
        assert_eq!(hits[1].content, "about testing");
        assert!(hits[0].score > hits[1].score);
    }

    #[tokio::test]
    async fn test_search_is_scoped_to_the_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.db");
        let store_a = VectorStore::open(&path, "pcb_processes").unwrap();
        store_a
            .insert_chunks(&[chunk(0, "reflow", vec![1.0, 0.0])])
            .await
            .unwrap();

        let store_b = VectorStore::open(&path, "other").unwrap();
        assert_eq!(store_b.count().await.unwrap(), 0);
        assert!(store_b.search(&[1.0, 0.0], 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.db");

        {
            let store = VectorStore::open(&path, "pcb_processes").unwrap();
            store
                .insert_chunks(&[chunk(0, "reflow", vec![0.5, 0.5])])
                .await
                .unwrap();
        }

        let reopened = VectorStore::open(&path, "pcb_processes").unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
        let hits = reopened.search(&[0.5, 0.5], 1).await.unwrap();
        assert_eq!(hits[0].content, "reflow");
    }
}
