//! Connection, collection, and document types shared across the crate

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arbitrary JSON object, used for document metadata and search filters
pub type Metadata = serde_json::Map<String, Value>;

/// Resolved connection parameters for one node invocation
///
/// Built fresh from the credentials each time the node runs; never persisted
/// or cached across invocations.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the Chroma server, e.g. `http://localhost:8000`
    pub server_url: String,

    /// Bearer token for authenticated instances
    ///
    /// `None` means no Authorization header is sent at all, which is distinct
    /// from sending an empty token.
    pub auth_token: Option<SecretString>,
}

impl ConnectionConfig {
    /// Attach the bearer header to a request when a token is configured
    pub fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token.expose_secret()),
            ),
            None => request,
        }
    }

    /// Whether this connection carries credentials
    pub fn has_auth(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Server URL without a trailing slash, for building request paths
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

/// A named collection together with the connection it lives on and the
/// metadata sent to the store when the collection is created
#[derive(Debug, Clone)]
pub struct CollectionConfig {
    /// Connection to use for all operations on this collection
    pub connection: ConnectionConfig,

    /// Collection name inside the store
    pub name: String,

    /// Collection-creation metadata (may carry the reserved `contentKey` and
    /// `distanceFunction` entries alongside arbitrary user keys)
    pub metadata: Metadata,
}

/// Distance metric used by the store to rank similarity
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistanceFunction {
    /// Cosine similarity (the store default)
    #[default]
    Cosine,
    /// Euclidean distance (L2)
    Euclidean,
    /// Manhattan distance (L1)
    Manhattan,
}

impl DistanceFunction {
    /// Wire name of the metric
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceFunction::Cosine => "cosine",
            DistanceFunction::Euclidean => "euclidean",
            DistanceFunction::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for DistanceFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cosine" => Ok(DistanceFunction::Cosine),
            "euclidean" => Ok(DistanceFunction::Euclidean),
            "manhattan" => Ok(DistanceFunction::Manhattan),
            other => Err(format!(
                "unknown distance function '{other}', expected cosine, euclidean or manhattan"
            )),
        }
    }
}

/// A document to be embedded and stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Text content that gets embedded
    pub content: String,

    /// Structured metadata stored alongside the content
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Create a document with empty metadata
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    /// Add a metadata field
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A document returned from similarity search, with its relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    /// The matched document
    pub document: Document,

    /// Score as reported by the store for the configured distance function
    pub score: f32,
}
