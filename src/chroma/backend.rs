//! The surface of the underlying vector store client
//!
//! Everything above this trait (the filtered adapter, collection lifecycle,
//! batched ingestion, the node façade) is written against it, so the whole
//! orchestration layer can be exercised with a recording implementation in
//! tests while production uses [`super::ChromaHttpClient`].

use async_trait::async_trait;

use super::error::VectorStoreResult;
use super::types::{CollectionConfig, ConnectionConfig, Document, Metadata, ScoredDocument};
use crate::embeddings::Embeddings;

/// Operations the orchestration layer needs from a Chroma client
#[async_trait]
pub trait ChromaBackend: Send + Sync {
    /// Verify that the named collection exists
    ///
    /// Fails with `CollectionNotFound` when it does not.
    async fn get_collection(&self, config: &CollectionConfig) -> VectorStoreResult<()>;

    /// Delete a collection by name
    ///
    /// Fails with `CollectionNotFound` when the collection is absent; callers
    /// that treat deletion as best-effort are expected to swallow that case.
    async fn delete_collection(
        &self,
        connection: &ConnectionConfig,
        name: &str,
    ) -> VectorStoreResult<()>;

    /// List the names of all collections on the server
    async fn list_collections(&self, connection: &ConnectionConfig) -> VectorStoreResult<Vec<String>>;

    /// Embed and insert documents, creating the collection first if it does
    /// not exist (using `config.metadata` at creation time)
    async fn add_documents(
        &self,
        config: &CollectionConfig,
        embeddings: &dyn Embeddings,
        documents: &[Document],
    ) -> VectorStoreResult<()>;

    /// Embed the query text and return the `k` most similar documents that
    /// match `filter`, ordered by relevance as reported by the store
    async fn similarity_search(
        &self,
        config: &CollectionConfig,
        embeddings: &dyn Embeddings,
        query: &str,
        k: usize,
        filter: &Metadata,
    ) -> VectorStoreResult<Vec<ScoredDocument>>;
}
