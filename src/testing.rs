//! Test doubles for the backend and embeddings seams

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::chroma::{
    ChromaBackend, CollectionConfig, ConnectionConfig, Document, Metadata, ScoredDocument,
    VectorStoreError, VectorStoreResult,
};
use crate::embeddings::{EmbeddingError, Embeddings};

/// One recorded backend invocation
#[derive(Debug, Clone)]
pub(crate) enum BackendCall {
    GetCollection {
        name: String,
        has_auth: bool,
        metadata: Metadata,
    },
    DeleteCollection {
        name: String,
        has_auth: bool,
    },
    ListCollections,
    AddDocuments {
        name: String,
        has_auth: bool,
        metadata: Metadata,
        documents: Vec<Document>,
    },
    SimilaritySearch {
        name: String,
        query: String,
        k: usize,
        filter: Metadata,
    },
}

/// Recording backend with scriptable failures
#[derive(Default)]
pub(crate) struct MockBackend {
    calls: Mutex<Vec<BackendCall>>,
    missing_collections: Mutex<HashSet<String>>,
    delete_error: Mutex<Option<VectorStoreError>>,
    fail_add_at: Mutex<Option<usize>>,
    collection_names: Mutex<Vec<String>>,
    search_results: Mutex<Vec<ScoredDocument>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `get_collection` fail with `CollectionNotFound` for this name
    pub fn mark_missing(&self, name: &str) {
        self.missing_collections
            .lock()
            .unwrap()
            .insert(name.to_string());
    }

    /// Make the next `delete_collection` call fail with `error`
    pub fn fail_delete_with(&self, error: VectorStoreError) {
        *self.delete_error.lock().unwrap() = Some(error);
    }

    /// Make the `index`-th `add_documents` call (zero-based) fail
    pub fn fail_add_at(&self, index: usize) {
        *self.fail_add_at.lock().unwrap() = Some(index);
    }

    pub fn set_collection_names(&self, names: &[&str]) {
        *self.collection_names.lock().unwrap() =
            names.iter().map(|name| name.to_string()).collect();
    }

    pub fn set_search_results(&self, results: Vec<ScoredDocument>) {
        *self.search_results.lock().unwrap() = results;
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Documents from each recorded `add_documents` call, in call order
    pub fn inserted_batches(&self) -> Vec<Vec<Document>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::AddDocuments { documents, .. } => Some(documents),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn add_calls_so_far(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, BackendCall::AddDocuments { .. }))
            .count()
    }
}

#[async_trait]
impl ChromaBackend for MockBackend {
    async fn get_collection(&self, config: &CollectionConfig) -> VectorStoreResult<()> {
        self.record(BackendCall::GetCollection {
            name: config.name.clone(),
            has_auth: config.connection.has_auth(),
            metadata: config.metadata.clone(),
        });

        if self.missing_collections.lock().unwrap().contains(&config.name) {
            return Err(VectorStoreError::CollectionNotFound {
                name: config.name.clone(),
            });
        }
        Ok(())
    }

    async fn delete_collection(
        &self,
        connection: &ConnectionConfig,
        name: &str,
    ) -> VectorStoreResult<()> {
        self.record(BackendCall::DeleteCollection {
            name: name.to_string(),
            has_auth: connection.has_auth(),
        });

        match self.delete_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn list_collections(
        &self,
        _connection: &ConnectionConfig,
    ) -> VectorStoreResult<Vec<String>> {
        self.record(BackendCall::ListCollections);
        Ok(self.collection_names.lock().unwrap().clone())
    }

    async fn add_documents(
        &self,
        config: &CollectionConfig,
        _embeddings: &dyn Embeddings,
        documents: &[Document],
    ) -> VectorStoreResult<()> {
        let index = self.add_calls_so_far();
        self.record(BackendCall::AddDocuments {
            name: config.name.clone(),
            has_auth: config.connection.has_auth(),
            metadata: config.metadata.clone(),
            documents: documents.to_vec(),
        });

        if *self.fail_add_at.lock().unwrap() == Some(index) {
            return Err(VectorStoreError::Api {
                status: 500,
                reason: "insert failed".to_string(),
            });
        }
        Ok(())
    }

    async fn similarity_search(
        &self,
        config: &CollectionConfig,
        _embeddings: &dyn Embeddings,
        query: &str,
        k: usize,
        filter: &Metadata,
    ) -> VectorStoreResult<Vec<ScoredDocument>> {
        self.record(BackendCall::SimilaritySearch {
            name: config.name.clone(),
            query: query.to_string(),
            k,
            filter: filter.clone(),
        });
        Ok(self.search_results.lock().unwrap().clone())
    }
}

/// Embeddings stub producing fixed-size zero vectors
pub(crate) struct StubEmbeddings;

#[async_trait]
impl Embeddings for StubEmbeddings {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|_| vec![0.0; 3]).collect())
    }

    async fn embed_query(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(vec![0.0; 3])
    }
}

/// Connection fixture without credentials
pub(crate) fn anonymous_connection() -> ConnectionConfig {
    ConnectionConfig {
        server_url: "http://localhost:8000".to_string(),
        auth_token: None,
    }
}
