//! ChromaDB vector store integration for workflow automation nodes
//!
//! This crate connects a workflow engine's vector-store node system to a
//! Chroma server:
//! - Credential handling with an optional bearer token and heartbeat check
//! - A filtered search adapter that merges a per-handle default filter into
//!   every similarity query
//! - Collection lifecycle management (create-time metadata assembly,
//!   best-effort clearing before ingestion)
//! - Batched, strictly sequential document ingestion
//! - The node façade and declarative field schema consumed by the engine

pub mod chroma;
pub mod credentials;
pub mod embeddings;
pub mod node;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use chroma::{
    ChromaBackend, ChromaHttpClient, CollectionConfig, ConnectionConfig, DistanceFunction,
    Document, Metadata, ScoredDocument, VectorStoreError, VectorStoreResult,
};
pub use credentials::ChromaCredentials;
pub use embeddings::{EmbeddingError, Embeddings};
pub use node::{ChromaVectorStoreNode, NodeContext, NodeError, NodeResult};
pub use store::FilteredStore;
