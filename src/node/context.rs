//! Workflow-engine context seam and typed parameter access
//!
//! The engine resolves node parameters and credentials; this crate only sees
//! the trait below. Resource-locator parameters (the collection selector) are
//! expected to arrive in canonical form, with any display-value extraction
//! already applied by the engine.

use async_trait::async_trait;
use serde_json::Value;

use super::error::{NodeError, NodeResult};
use crate::credentials::ChromaCredentials;

/// Node parameter names used by this integration
pub mod parameters {
    /// Resource-locator parameter naming the target collection
    pub const COLLECTION: &str = "chromaCollection";
    pub const CONTENT_PAYLOAD_KEY: &str = "options.contentPayloadKey";
    pub const METADATA_PAYLOAD_KEY: &str = "options.metadataPayloadKey";
    pub const CLEAR_COLLECTION: &str = "options.clearCollection";
    pub const DISTANCE_FUNCTION: &str = "options.distanceFunction";
    pub const COLLECTION_METADATA: &str = "options.collectionMetadata";
    pub const BATCH_SIZE: &str = "options.batchSize";
}

/// What the node needs from the surrounding workflow engine
#[async_trait]
pub trait NodeContext: Send + Sync {
    /// Resolve a parameter for the given input item; `None` when unset
    fn parameter(&self, name: &str, item_index: usize) -> Option<Value>;

    /// Resolve the Chroma credentials configured on the node
    async fn credentials(&self) -> NodeResult<ChromaCredentials>;
}

/// Read a string parameter, failing fast on a type mismatch
pub fn string_parameter(
    context: &dyn NodeContext,
    name: &str,
    item_index: usize,
    default: &str,
) -> NodeResult<String> {
    match context.parameter(name, item_index) {
        None => Ok(default.to_string()),
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(type_mismatch(name, "a string", &other)),
    }
}

/// Read a boolean parameter, failing fast on a type mismatch
pub fn bool_parameter(
    context: &dyn NodeContext,
    name: &str,
    item_index: usize,
    default: bool,
) -> NodeResult<bool> {
    match context.parameter(name, item_index) {
        None => Ok(default),
        Some(Value::Bool(value)) => Ok(value),
        Some(other) => Err(type_mismatch(name, "a boolean", &other)),
    }
}

/// Read an integer parameter, failing fast on a type mismatch
pub fn integer_parameter(
    context: &dyn NodeContext,
    name: &str,
    item_index: usize,
    default: i64,
) -> NodeResult<i64> {
    match context.parameter(name, item_index) {
        None => Ok(default),
        Some(Value::Number(value)) => value
            .as_i64()
            .ok_or_else(|| type_mismatch(name, "an integer", &Value::Number(value.clone()))),
        Some(other) => Err(type_mismatch(name, "an integer", &other)),
    }
}

fn type_mismatch(parameter: &str, expected: &'static str, found: &Value) -> NodeError {
    NodeError::ParameterType {
        parameter: parameter.to_string(),
        expected,
        found: json_type_name(found).to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
