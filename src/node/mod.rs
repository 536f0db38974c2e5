//! Workflow-engine-facing node surface
//!
//! The engine drives three operations: opening a query-capable handle for
//! retrieval (`get_vector_store_client`), populating a collection with
//! documents (`populate_vector_store`), and releasing the handle afterwards
//! (`release_vector_store_client`). Parameter resolution and credential
//! storage belong to the engine and are reached through [`NodeContext`].

pub mod context;
pub mod descriptor;
mod error;


pub use context::{parameters, NodeContext};
pub use error::{NodeError, NodeResult};

use std::sync::Arc;

use tracing::debug;

use crate::chroma::{ChromaBackend, ChromaHttpClient, DistanceFunction, Document, Metadata};
use crate::embeddings::Embeddings;
use crate::store::{build_collection_config, clear_collection_if_requested, ingest, FilteredStore};
use context::{bool_parameter, integer_parameter, string_parameter};

/// The ChromaDB vector store node
pub struct ChromaVectorStoreNode {
    backend: Arc<dyn ChromaBackend>,
}

impl ChromaVectorStoreNode {
    /// Create a node over an explicit backend (tests use a recording one)
    pub fn new(backend: Arc<dyn ChromaBackend>) -> Self {
        Self { backend }
    }

    /// Create a node backed by the Chroma REST API
    pub fn with_http_backend() -> NodeResult<Self> {
        let client = ChromaHttpClient::new()?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Open a query-capable handle to an existing collection
    ///
    /// `filter` becomes the handle's default filter, merged into every search.
    /// String options are validated before credentials are resolved, so a
    /// type mismatch never costs a network round-trip.
    pub async fn get_vector_store_client(
        &self,
        context: &dyn NodeContext,
        filter: Option<Metadata>,
        embeddings: Arc<dyn Embeddings>,
        item_index: usize,
    ) -> NodeResult<FilteredStore> {
        let collection_name =
            string_parameter(context, parameters::COLLECTION, item_index, "")?;
        let content_payload_key =
            string_parameter(context, parameters::CONTENT_PAYLOAD_KEY, item_index, "")?;
        // Read for validation; the key itself only matters to the store.
        let _metadata_payload_key =
            string_parameter(context, parameters::METADATA_PAYLOAD_KEY, item_index, "")?;

        let credentials = context.credentials().await?;
        let config = build_collection_config(
            credentials.connection(),
            collection_name,
            &content_payload_key,
            DistanceFunction::default(),
            "{}",
        );

        debug!(collection = %config.name, "opening vector store client");
        let store =
            FilteredStore::open(self.backend.clone(), embeddings, config, filter.unwrap_or_default())
                .await?;
        Ok(store)
    }

    /// Clear the target collection when requested, then insert `documents`
    /// in batches
    pub async fn populate_vector_store(
        &self,
        context: &dyn NodeContext,
        embeddings: &dyn Embeddings,
        documents: &[Document],
        item_index: usize,
    ) -> NodeResult<()> {
        let collection_name =
            string_parameter(context, parameters::COLLECTION, item_index, "")?;
        let content_payload_key =
            string_parameter(context, parameters::CONTENT_PAYLOAD_KEY, item_index, "")?;
        let _metadata_payload_key =
            string_parameter(context, parameters::METADATA_PAYLOAD_KEY, item_index, "")?;
        let clear_collection =
            bool_parameter(context, parameters::CLEAR_COLLECTION, item_index, false)?;
        let distance_function = string_parameter(
            context,
            parameters::DISTANCE_FUNCTION,
            item_index,
            DistanceFunction::default().as_str(),
        )?;
        let collection_metadata =
            string_parameter(context, parameters::COLLECTION_METADATA, item_index, "{}")?;
        let batch_size = integer_parameter(
            context,
            parameters::BATCH_SIZE,
            item_index,
            descriptor::DEFAULT_BATCH_SIZE,
        )?;

        let distance_function: DistanceFunction =
            distance_function
                .parse()
                .map_err(|_| NodeError::ParameterType {
                    parameter: parameters::DISTANCE_FUNCTION.to_string(),
                    expected: "one of cosine, euclidean, manhattan",
                    found: distance_function,
                })?;

        let credentials = context.credentials().await?;
        let config = build_collection_config(
            credentials.connection(),
            collection_name,
            &content_payload_key,
            distance_function,
            &collection_metadata,
        );

        clear_collection_if_requested(
            self.backend.as_ref(),
            &config.connection,
            &config.name,
            clear_collection,
        )
        .await;

        debug!(
            collection = %config.name,
            documents = documents.len(),
            "populating vector store"
        );
        ingest(self.backend.as_ref(), embeddings, &config, documents, batch_size).await?;
        Ok(())
    }

    /// Release a handle obtained from [`Self::get_vector_store_client`]
    ///
    /// The store is reached over plain HTTP requests; there is no persistent
    /// connection to close. This exists to satisfy the engine's lifecycle
    /// contract and always succeeds.
    pub fn release_vector_store_client(&self, store: FilteredStore) {
        debug!(collection = store.collection_name(), "released vector store client");
        drop(store);
    }

    /// List collections for the resource-locator search UI, optionally
    /// filtered by a case-insensitive substring of the name
    pub async fn search_collections(
        &self,
        context: &dyn NodeContext,
        query: Option<&str>,
    ) -> NodeResult<Vec<String>> {
        let credentials = context.credentials().await?;
        let names = self
            .backend
            .list_collections(&credentials.connection())
            .await?;

        let filtered = match query {
            Some(query) if !query.is_empty() => {
                let needle = query.to_lowercase();
                names
                    .into_iter()
                    .filter(|name| name.to_lowercase().contains(&needle))
                    .collect()
            }
            _ => names,
        };
        Ok(filtered)
    }
}
