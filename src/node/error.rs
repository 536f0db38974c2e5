//! Node-level error types

use thiserror::Error;

use crate::chroma::VectorStoreError;

/// Result type for node operations
pub type NodeResult<T> = Result<T, NodeError>;

/// Errors surfaced to the workflow engine
#[derive(Error, Debug)]
pub enum NodeError {
    /// A node parameter has the wrong type; raised before any network I/O
    #[error("Parameter '{parameter}' must be {expected}, got {found}")]
    ParameterType {
        parameter: String,
        expected: &'static str,
        found: String,
    },

    #[error("Failed to resolve credentials: {reason}")]
    Credential { reason: String },

    /// Store errors propagate unmodified; the client's message reaches the
    /// workflow author verbatim
    #[error(transparent)]
    Store(#[from] VectorStoreError),
}
