//! Ollama embedding client.
//!
//! Thin HTTP client for the Ollama `/api/embed` endpoint, plus the cosine
//! similarity helpers retrieval ranking needs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RagError, Result};

/// Default Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default embedding model.
pub const DEFAULT_MODEL: &str = "qwen3-embedding:0.6b";

/// Client for generating text embeddings through an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaEmbeddings {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbeddings {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate embeddings for a batch of texts in one request.
    pub async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        debug!("Embedding {} texts with {}", texts.len(), self.model);

        let response = self
            .client
            .post(&url)
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await?
            .error_for_status()?;

        let body: EmbedResponse = response.json().await?;
        if body.embeddings.len() != texts.len() {
            return Err(RagError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                body.embeddings.len()
            )));
        }

        Ok(body.embeddings)
    }

    /// Generate an embedding for a single text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors
            .pop()
            .ok_or_else(|| RagError::Embedding("no embedding returned".to_string()))
    }

    /// Compute cosine similarity between two vectors.
    ///
    /// Returns a value between -1.0 and 1.0, where 1.0 means identical,
    /// 0.0 means orthogonal, and -1.0 means opposite.
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }

    /// Normalize a similarity score to 0-1 range.
    pub fn normalize_similarity(similarity: f32) -> f32 {
        (similarity + 1.0) / 2.0
    }
}

impl Default for OllamaEmbeddings {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_same() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        let sim = OllamaEmbeddings::cosine_similarity(&a, &b);
        assert!((sim - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = OllamaEmbeddings::cosine_similarity(&a, &b);
        assert!(sim.abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        let sim = OllamaEmbeddings::cosine_similarity(&a, &b);
        assert!((sim + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_mismatched_lengths() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(OllamaEmbeddings::cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_normalize_similarity() {
        assert!((OllamaEmbeddings::normalize_similarity(1.0) - 1.0).abs() < 0.001);
        assert!((OllamaEmbeddings::normalize_similarity(0.0) - 0.5).abs() < 0.001);
        assert!((OllamaEmbeddings::normalize_similarity(-1.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = OllamaEmbeddings::new("http://localhost:11434/", DEFAULT_MODEL);
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[tokio::test]
    #[ignore = "requires a running Ollama server"]
    async fn test_embed_single() {
        let client = OllamaEmbeddings::default();
        let vector = client.embed("reflow soldering profile").await.unwrap();
        assert!(!vector.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires a running Ollama server"]
    async fn test_embed_batch() {
        let client = OllamaEmbeddings::default();
        let vectors = client
            .embed_batch(&["solder paste", "pick and place"])
            .await
            .unwrap();
        assert_eq!(vectors.len(), 2);
    }
}
