//! Orchestration core over the Chroma client
//!
//! Three pieces with actual behavior live here: the filtered search adapter,
//! the collection lifecycle helpers, and the batched ingestion pipeline. All
//! of them operate through [`crate::chroma::ChromaBackend`] and carry no state
//! between node invocations.

mod filtered;
mod ingest;
mod lifecycle;


pub use filtered::FilteredStore;
pub use ingest::ingest;
pub use lifecycle::{
    build_collection_config, clear_collection_if_requested, CONTENT_KEY, DISTANCE_FUNCTION_KEY,
};
