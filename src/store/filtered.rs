//! Similarity search with a bound default filter
//!
//! A handle opened against an existing collection carries a default filter
//! fixed at open time. Every search merges that default with the per-query
//! filter so callers never have to know the default exists. Each handle owns
//! its own default filter; two handles opened against the same collection do
//! not share state.

use std::sync::Arc;

use tracing::debug;

use crate::chroma::{
    ChromaBackend, CollectionConfig, Metadata, ScoredDocument, VectorStoreResult,
};
use crate::embeddings::Embeddings;

/// Query-capable handle to an existing collection
pub struct FilteredStore {
    backend: Arc<dyn ChromaBackend>,
    embeddings: Arc<dyn Embeddings>,
    config: CollectionConfig,
    default_filter: Metadata,
}

impl FilteredStore {
    /// Open a handle to an existing collection, binding `default_filter` to it
    ///
    /// Fails with `CollectionNotFound` when the collection is absent. The
    /// default filter is set here and never mutated afterwards.
    pub async fn open(
        backend: Arc<dyn ChromaBackend>,
        embeddings: Arc<dyn Embeddings>,
        config: CollectionConfig,
        default_filter: Metadata,
    ) -> VectorStoreResult<Self> {
        backend.get_collection(&config).await?;

        debug!(
            collection = %config.name,
            default_filter_keys = default_filter.len(),
            "opened collection handle"
        );

        Ok(Self {
            backend,
            embeddings,
            config,
            default_filter,
        })
    }

    /// Search the collection, merging the bound default filter with `filter`
    ///
    /// The merge is shallow: keys in `filter` override same-named keys in the
    /// default. Ordering, cardinality, and the handling of `k == 0` are
    /// whatever the underlying client returns.
    pub async fn search(
        &self,
        query: &str,
        k: usize,
        filter: Option<&Metadata>,
    ) -> VectorStoreResult<Vec<ScoredDocument>> {
        let effective_filter = merge_filters(&self.default_filter, filter);
        self.backend
            .similarity_search(
                &self.config,
                self.embeddings.as_ref(),
                query,
                k,
                &effective_filter,
            )
            .await
    }

    /// Name of the collection this handle is bound to
    pub fn collection_name(&self) -> &str {
        &self.config.name
    }

    /// The filter bound at open time
    pub fn default_filter(&self) -> &Metadata {
        &self.default_filter
    }
}

/// Shallow merge of two filters; `overrides` wins on key collision
pub(crate) fn merge_filters(default: &Metadata, overrides: Option<&Metadata>) -> Metadata {
    let mut merged = default.clone();
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
