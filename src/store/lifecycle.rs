//! Collection lifecycle: create-config assembly and best-effort clearing

use serde_json::Value;
use tracing::{debug, warn};

use crate::chroma::{
    ChromaBackend, CollectionConfig, ConnectionConfig, DistanceFunction, Metadata,
};

/// Reserved metadata key overriding the store's content payload key
pub const CONTENT_KEY: &str = "contentKey";

/// Reserved metadata key selecting a non-default distance function
pub const DISTANCE_FUNCTION_KEY: &str = "distanceFunction";

/// Assemble the configuration that governs collection creation
///
/// The metadata is merged from three sources, later ones winning on key
/// collision: the user-supplied JSON blob, a `contentKey` entry when
/// `content_payload_key` is non-empty, and a `distanceFunction` entry when the
/// metric differs from cosine. The key is omitted entirely for cosine so the
/// store cannot distinguish "explicitly cosine" from "unset".
pub fn build_collection_config(
    connection: ConnectionConfig,
    collection_name: impl Into<String>,
    content_payload_key: &str,
    distance_function: DistanceFunction,
    user_metadata_json: &str,
) -> CollectionConfig {
    let mut metadata = parse_user_metadata(user_metadata_json);

    if !content_payload_key.is_empty() {
        metadata.insert(
            CONTENT_KEY.to_string(),
            Value::String(content_payload_key.to_string()),
        );
    }

    if distance_function != DistanceFunction::Cosine {
        metadata.insert(
            DISTANCE_FUNCTION_KEY.to_string(),
            Value::String(distance_function.as_str().to_string()),
        );
    }

    CollectionConfig {
        connection,
        name: collection_name.into(),
        metadata,
    }
}

/// Parse user-supplied collection metadata
///
/// Malformed input degrades to an empty map instead of failing: bad metadata
/// must not block ingestion of otherwise-valid documents. Non-object JSON
/// (numbers, arrays, strings) degrades the same way.
fn parse_user_metadata(raw: &str) -> Metadata {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("collection metadata is not a JSON object, ignoring it");
            Metadata::new()
        }
        Err(error) => {
            warn!(%error, "failed to parse collection metadata, ignoring it");
            Metadata::new()
        }
    }
}

/// Delete the named collection before ingestion when `should_clear` is set
///
/// Clearing is best-effort: "clear" means "ensure absent", so a missing
/// collection is not an error, and a failure to reach the store must never
/// block the insert that follows. All failures are logged and swallowed.
pub async fn clear_collection_if_requested(
    backend: &dyn ChromaBackend,
    connection: &ConnectionConfig,
    collection_name: &str,
    should_clear: bool,
) {
    if !should_clear {
        return;
    }

    match backend.delete_collection(connection, collection_name).await {
        Ok(()) => debug!(collection = collection_name, "cleared collection before ingestion"),
        Err(error) => debug!(
            collection = collection_name,
            %error,
            "skipping collection clear"
        ),
    }
}
