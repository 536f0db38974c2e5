//! Chroma vector store client boundary
//!
//! This module defines the surface of the underlying vector store client:
//! connection and collection configuration, the document types that cross the
//! wire, the [`ChromaBackend`] trait, and the reqwest-based implementation of
//! that trait against the Chroma v2 REST API.

mod backend;
mod error;
mod http;
mod types;

pub use backend::ChromaBackend;
pub use error::{VectorStoreError, VectorStoreResult};
pub use http::ChromaHttpClient;
pub use types::{
    CollectionConfig, ConnectionConfig, DistanceFunction, Document, Metadata, ScoredDocument,
};
