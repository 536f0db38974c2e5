//! Embedding model seam
//!
//! The embedding model is an external collaborator: the workflow engine wires
//! a concrete model into the node at runtime. This crate only needs the two
//! operations below.

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by the embedding model
#[derive(Error, Debug)]
#[error("Embedding generation failed: {reason}")]
pub struct EmbeddingError {
    pub reason: String,
}

impl EmbeddingError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Produces numeric vector representations of text
#[async_trait]
pub trait Embeddings: Send + Sync {
    /// Embed a batch of document contents, one vector per input in order
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Embed a single query string
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
