//! Chroma API credentials
//!
//! Mirrors the credential schema exposed to workflow authors: a required
//! server URL and an optional API key. The key is held as a secret and only
//! exposed at the moment the bearer header is built.

use secrecy::SecretString;
use tracing::debug;

use crate::chroma::{ConnectionConfig, VectorStoreError, VectorStoreResult};

/// Health-check path probed by the credential test
const HEARTBEAT_PATH: &str = "/api/v2/heartbeat";

/// Resolved credentials for a Chroma instance
#[derive(Debug, Clone)]
pub struct ChromaCredentials {
    /// Base URL of the Chroma server
    pub server_url: String,

    /// Optional API key; an empty key counts as no key
    pub api_key: Option<SecretString>,
}

impl ChromaCredentials {
    /// Create credentials, normalizing an empty API key to `None`
    pub fn new(server_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            server_url: server_url.into(),
            api_key: api_key
                .filter(|key| !key.is_empty())
                .map(SecretString::new),
        }
    }

    /// Build the per-invocation connection configuration
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            server_url: self.server_url.clone(),
            auth_token: self.api_key.clone(),
        }
    }

    /// URL of the liveness endpoint
    pub fn heartbeat_url(&self) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), HEARTBEAT_PATH)
    }

    /// Probe the server's health-check endpoint with these credentials
    pub async fn test_connection(&self, client: &reqwest::Client) -> VectorStoreResult<()> {
        let connection = self.connection();
        let request = connection.authorize(client.get(self.heartbeat_url()));

        let response = request
            .send()
            .await
            .map_err(|e| VectorStoreError::Connection {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::from_status(status, body));
        }

        debug!(url = %self.server_url, "credential heartbeat succeeded");
        Ok(())
    }
}
