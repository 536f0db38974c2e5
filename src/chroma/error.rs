//! Vector store error types

use thiserror::Error;

use crate::embeddings::EmbeddingError;

/// Result type for vector store operations
pub type VectorStoreResult<T> = Result<T, VectorStoreError>;

/// Errors surfaced by the vector store client
///
/// Messages pass through to the workflow author verbatim; no retry logic is
/// attached to any variant in this crate.
#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("Failed to reach vector store: {reason}")]
    Connection { reason: String },

    #[error("Vector store rejected credentials: {reason}")]
    Auth { reason: String },

    #[error("Collection not found: {name}")]
    CollectionNotFound { name: String },

    #[error("Vector store request failed (HTTP {status}): {reason}")]
    Api { status: u16, reason: String },

    #[error("Unexpected response from vector store: {reason}")]
    InvalidResponse { reason: String },

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

impl VectorStoreError {
    /// Map a transport-level failure to the taxonomy
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        VectorStoreError::Connection {
            reason: error.to_string(),
        }
    }

    /// Map a non-success HTTP status and response body to the taxonomy
    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                VectorStoreError::Auth {
                    reason: format!("HTTP {}: {}", status.as_u16(), body),
                }
            }
            _ => VectorStoreError::Api {
                status: status.as_u16(),
                reason: body,
            },
        }
    }

    /// Whether the error means the requested collection is absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            VectorStoreError::CollectionNotFound { .. }
                | VectorStoreError::Api { status: 404, .. }
        )
    }
}
