//! Declarative field schema for the node UI
//!
//! Configuration data consumed by the workflow engine's parameter renderer.
//! Nothing in here carries behavior; the façade reads raw parameters through
//! [`super::context::NodeContext`] regardless of what the UI showed.

use serde::Serialize;
use serde_json::{json, Value};

/// Content payload key assumed by the store when none is configured
pub const DEFAULT_CONTENT_PAYLOAD_KEY: &str = "content";

/// Metadata payload key assumed by the store when none is configured
pub const DEFAULT_METADATA_PAYLOAD_KEY: &str = "metadata";

/// Default number of documents per ingestion batch
pub const DEFAULT_BATCH_SIZE: i64 = 100;

/// Recommended batch size bounds shown in the UI
pub const MIN_BATCH_SIZE: i64 = 1;
pub const MAX_BATCH_SIZE: i64 = 1000;

/// Rendering kind of a field
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum FieldKind {
    String,
    Boolean,
    #[serde(rename_all = "camelCase")]
    Number { min_value: i64, max_value: i64 },
    Json,
    Options { choices: &'static [&'static str] },
    ResourceLocator,
}

/// One declarative UI field
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub display_name: &'static str,
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub default: Value,
    pub description: &'static str,
}

/// Fields shown on every operation mode
pub fn shared_fields() -> Vec<FieldDescriptor> {
    vec![FieldDescriptor {
        display_name: "Collection",
        name: "chromaCollection",
        kind: FieldKind::ResourceLocator,
        default: json!(""),
        description: "The ChromaDB collection to operate on",
    }]
}

fn shared_options() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor {
            display_name: "Content Payload Key",
            name: "contentPayloadKey",
            kind: FieldKind::String,
            default: json!(DEFAULT_CONTENT_PAYLOAD_KEY),
            description: "The key to use for the content payload in ChromaDB",
        },
        FieldDescriptor {
            display_name: "Metadata Payload Key",
            name: "metadataPayloadKey",
            kind: FieldKind::String,
            default: json!(DEFAULT_METADATA_PAYLOAD_KEY),
            description: "The key to use for the metadata payload in ChromaDB",
        },
    ]
}

/// Options shown on the insert operation
pub fn insert_fields() -> Vec<FieldDescriptor> {
    let mut fields = vec![
        FieldDescriptor {
            display_name: "Clear Collection",
            name: "clearCollection",
            kind: FieldKind::Boolean,
            default: json!(false),
            description: "Whether to clear the collection before inserting new documents",
        },
        FieldDescriptor {
            display_name: "Distance Function",
            name: "distanceFunction",
            kind: FieldKind::Options {
                choices: &["cosine", "euclidean", "manhattan"],
            },
            default: json!("cosine"),
            description: "Distance function to use for similarity calculations",
        },
        FieldDescriptor {
            display_name: "Collection Metadata",
            name: "collectionMetadata",
            kind: FieldKind::Json,
            default: json!("{}"),
            description: "JSON metadata to associate with the collection",
        },
        FieldDescriptor {
            display_name: "Batch Size",
            name: "batchSize",
            kind: FieldKind::Number {
                min_value: MIN_BATCH_SIZE,
                max_value: MAX_BATCH_SIZE,
            },
            default: json!(DEFAULT_BATCH_SIZE),
            description: "Number of documents to process in each batch for embedding operations",
        },
    ];
    fields.extend(shared_options());
    fields
}

/// Example search filter shown as the default, so authors see the store's
/// operator syntax before writing their own
pub const SEARCH_FILTER_EXAMPLE: &str = "{\n  \"$and\": [\n    {\n      \"metadata.category\": {\n        \"$eq\": \"documentation\"\n      }\n    }\n  ]\n}";

/// Options shown on the retrieve operation
pub fn retrieve_fields() -> Vec<FieldDescriptor> {
    let mut fields = vec![
        FieldDescriptor {
            display_name: "Search Filter",
            name: "searchFilterJson",
            kind: FieldKind::Json,
            default: json!(SEARCH_FILTER_EXAMPLE),
            description: "Filter documents using ChromaDB's filtering syntax",
        },
        FieldDescriptor {
            display_name: "Include Metadata",
            name: "includeMetadata",
            kind: FieldKind::Boolean,
            default: json!(true),
            description: "Whether to include document metadata in search results",
        },
        FieldDescriptor {
            display_name: "Metadata Keys",
            name: "metadataKeys",
            kind: FieldKind::String,
            default: json!(""),
            description:
                "Comma-separated list of specific metadata keys to include (leave empty for all)",
        },
    ];
    fields.extend(shared_options());
    fields
}

/// Options shown on the update operation
pub fn update_fields() -> Vec<FieldDescriptor> {
    shared_options()
}
