//! Batched document ingestion

use tracing::debug;

use crate::chroma::{ChromaBackend, CollectionConfig, Document, VectorStoreResult};
use crate::embeddings::Embeddings;

/// Insert documents into a collection, respecting a maximum batch size
///
/// A non-positive batch size, or one at least as large as the document list,
/// results in a single insertion call. Otherwise the list is partitioned into
/// consecutive chunks of `batch_size` documents (the final chunk may be
/// shorter) and one insertion call is issued per chunk, strictly sequentially.
/// Sequential issuance bounds memory and preserves document order; the store
/// does not guarantee safe concurrent create/insert races.
///
/// A failed chunk aborts the pipeline with that error. Chunks already
/// inserted stay inserted; partial ingestion is an accepted outcome.
pub async fn ingest(
    backend: &dyn ChromaBackend,
    embeddings: &dyn Embeddings,
    config: &CollectionConfig,
    documents: &[Document],
    batch_size: i64,
) -> VectorStoreResult<()> {
    if batch_size <= 0 || batch_size as usize >= documents.len() {
        return backend.add_documents(config, embeddings, documents).await;
    }

    let chunk_count = documents.len().div_ceil(batch_size as usize);
    debug!(
        collection = %config.name,
        documents = documents.len(),
        batch_size,
        chunks = chunk_count,
        "ingesting in batches"
    );

    for chunk in documents.chunks(batch_size as usize) {
        backend.add_documents(config, embeddings, chunk).await?;
    }

    Ok(())
}
