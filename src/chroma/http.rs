//! reqwest-based implementation of [`ChromaBackend`] against the Chroma v2
//! REST API
//!
//! Every operation is a single HTTP round-trip; there is no connection state
//! beyond reqwest's internal pool and nothing is cached between calls.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::backend::ChromaBackend;
use super::error::{VectorStoreError, VectorStoreResult};
use super::types::{CollectionConfig, ConnectionConfig, Document, Metadata, ScoredDocument};
use crate::embeddings::Embeddings;

/// Default request timeout
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Tenant used when none is configured
const DEFAULT_TENANT: &str = "default_tenant";

/// Database used when none is configured
const DEFAULT_DATABASE: &str = "default_database";

/// HTTP client for a Chroma server
pub struct ChromaHttpClient {
    /// Shared HTTP client
    client: reqwest::Client,

    /// Tenant segment of collection routes
    tenant: String,

    /// Database segment of collection routes
    database: String,
}

impl ChromaHttpClient {
    /// Create a client for the default tenant and database
    pub fn new() -> VectorStoreResult<Self> {
        Self::with_tenant(DEFAULT_TENANT, DEFAULT_DATABASE)
    }

    /// Create a client scoped to a specific tenant and database
    pub fn with_tenant(
        tenant: impl Into<String>,
        database: impl Into<String>,
    ) -> VectorStoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .build()
            .map_err(|e| VectorStoreError::Connection {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            tenant: tenant.into(),
            database: database.into(),
        })
    }

    fn collections_url(&self, connection: &ConnectionConfig) -> String {
        format!(
            "{}/api/v2/tenants/{}/databases/{}/collections",
            connection.base_url(),
            self.tenant,
            self.database
        )
    }

    fn collection_url(&self, connection: &ConnectionConfig, name: &str) -> String {
        format!("{}/{}", self.collections_url(connection), name)
    }

    fn records_url(&self, connection: &ConnectionConfig, collection_id: &str, action: &str) -> String {
        format!("{}/{}/{}", self.collections_url(connection), collection_id, action)
    }

    /// Send a request and map transport failures and non-success statuses to
    /// the error taxonomy
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> VectorStoreResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(VectorStoreError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::from_status(status, body));
        }

        Ok(response)
    }

    /// Look up a collection by name, returning its server-side record
    async fn resolve_collection(
        &self,
        config: &CollectionConfig,
    ) -> VectorStoreResult<CollectionRecord> {
        let url = self.collection_url(&config.connection, &config.name);
        let request = config.connection.authorize(self.client.get(&url));

        let response = match self.execute(request).await {
            Ok(response) => response,
            Err(error) if error.is_not_found() => {
                return Err(VectorStoreError::CollectionNotFound {
                    name: config.name.clone(),
                })
            }
            Err(error) => return Err(error),
        };

        response
            .json::<CollectionRecord>()
            .await
            .map_err(|e| VectorStoreError::InvalidResponse {
                reason: format!("Failed to parse collection record: {e}"),
            })
    }

    /// Create the collection if absent and return its record
    async fn ensure_collection(
        &self,
        config: &CollectionConfig,
    ) -> VectorStoreResult<CollectionRecord> {
        let url = self.collections_url(&config.connection);
        let body = CreateCollectionRequest {
            name: &config.name,
            metadata: (!config.metadata.is_empty()).then_some(&config.metadata),
            get_or_create: true,
        };
        let request = config
            .connection
            .authorize(self.client.post(&url).json(&body));

        let response = self.execute(request).await?;
        response
            .json::<CollectionRecord>()
            .await
            .map_err(|e| VectorStoreError::InvalidResponse {
                reason: format!("Failed to parse collection record: {e}"),
            })
    }
}

#[async_trait]
impl ChromaBackend for ChromaHttpClient {
    async fn get_collection(&self, config: &CollectionConfig) -> VectorStoreResult<()> {
        self.resolve_collection(config).await.map(|_| ())
    }

    async fn delete_collection(
        &self,
        connection: &ConnectionConfig,
        name: &str,
    ) -> VectorStoreResult<()> {
        let url = self.collection_url(connection, name);
        let request = connection.authorize(self.client.delete(&url));

        match self.execute(request).await {
            Ok(_) => {
                debug!(collection = name, "deleted collection");
                Ok(())
            }
            Err(error) if error.is_not_found() => Err(VectorStoreError::CollectionNotFound {
                name: name.to_string(),
            }),
            Err(error) => Err(error),
        }
    }

    async fn list_collections(
        &self,
        connection: &ConnectionConfig,
    ) -> VectorStoreResult<Vec<String>> {
        let url = self.collections_url(connection);
        let request = connection.authorize(self.client.get(&url));

        let records: Vec<CollectionRecord> = self
            .execute(request)
            .await?
            .json()
            .await
            .map_err(|e| VectorStoreError::InvalidResponse {
                reason: format!("Failed to parse collection list: {e}"),
            })?;

        Ok(records.into_iter().map(|record| record.name).collect())
    }

    async fn add_documents(
        &self,
        config: &CollectionConfig,
        embeddings: &dyn Embeddings,
        documents: &[Document],
    ) -> VectorStoreResult<()> {
        let collection = self.ensure_collection(config).await?;
        if documents.is_empty() {
            return Ok(());
        }

        let contents: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let vectors = embeddings.embed_documents(&contents).await?;

        let body = AddRecordsRequest {
            ids: documents.iter().map(|_| Uuid::now_v7().to_string()).collect(),
            embeddings: vectors,
            documents: contents,
            metadatas: documents.iter().map(|d| d.metadata.clone()).collect(),
        };

        let url = self.records_url(&config.connection, &collection.id, "add");
        let request = config
            .connection
            .authorize(self.client.post(&url).json(&body));
        self.execute(request).await?;

        debug!(
            collection = %config.name,
            count = documents.len(),
            "inserted documents"
        );
        Ok(())
    }

    async fn similarity_search(
        &self,
        config: &CollectionConfig,
        embeddings: &dyn Embeddings,
        query: &str,
        k: usize,
        filter: &Metadata,
    ) -> VectorStoreResult<Vec<ScoredDocument>> {
        let collection = self.resolve_collection(config).await?;
        let query_vector = embeddings.embed_query(query).await?;

        let body = QueryRequest {
            query_embeddings: vec![query_vector],
            n_results: k,
            where_filter: (!filter.is_empty()).then_some(filter),
            include: &["documents", "metadatas", "distances"],
        };

        let url = self.records_url(&config.connection, &collection.id, "query");
        let request = config
            .connection
            .authorize(self.client.post(&url).json(&body));

        let response: QueryResponse = self
            .execute(request)
            .await?
            .json()
            .await
            .map_err(|e| VectorStoreError::InvalidResponse {
                reason: format!("Failed to parse query response: {e}"),
            })?;

        Ok(response.into_scored_documents())
    }
}

#[derive(Debug, Deserialize)]
struct CollectionRecord {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a Metadata>,
    get_or_create: bool,
}

#[derive(Debug, Serialize)]
struct AddRecordsRequest {
    ids: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    documents: Vec<String>,
    metadatas: Vec<Metadata>,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query_embeddings: Vec<Vec<f32>>,
    n_results: usize,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    where_filter: Option<&'a Metadata>,
    include: &'static [&'static str],
}

/// Query results come back as one row of parallel arrays per query embedding;
/// this client always sends exactly one query embedding
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    documents: Vec<Vec<Option<String>>>,
    #[serde(default)]
    metadatas: Vec<Vec<Option<Metadata>>>,
    #[serde(default)]
    distances: Vec<Vec<f32>>,
}

impl QueryResponse {
    fn into_scored_documents(mut self) -> Vec<ScoredDocument> {
        let documents = if self.documents.is_empty() {
            Vec::new()
        } else {
            self.documents.swap_remove(0)
        };
        let mut metadatas = if self.metadatas.is_empty() {
            Vec::new()
        } else {
            self.metadatas.swap_remove(0)
        };
        let distances = if self.distances.is_empty() {
            Vec::new()
        } else {
            self.distances.swap_remove(0)
        };

        documents
            .into_iter()
            .zip(distances)
            .enumerate()
            .map(|(index, (content, score))| ScoredDocument {
                document: Document {
                    content: content.unwrap_or_default(),
                    metadata: metadatas
                        .get_mut(index)
                        .and_then(Option::take)
                        .unwrap_or_default(),
                },
                score,
            })
            .collect()
    }
}
