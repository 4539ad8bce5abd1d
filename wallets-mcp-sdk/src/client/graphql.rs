//! GraphQL-over-HTTP envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ClientError;

/// Request body: `{"query": "...", "variables": {...}}`.
#[derive(Debug, Serialize)]
pub(super) struct GraphqlRequest<'a, V: Serialize> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a V>,
}

/// An error entry, either from the top-level `errors` array or from the
/// `errors` field of a mutation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// Response body. `data` stays untyped until `errors` has been checked, so a
/// partial result next to an error list never masks the errors.
#[derive(Debug, Deserialize)]
pub(super) struct GraphqlResponse {
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

impl GraphqlResponse {
    /// Decode the `data` payload, errors taking precedence over data.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        match (self.errors, self.data) {
            (Some(errors), _) if !errors.is_empty() => Err(ClientError::Api(errors)),
            (_, Some(data)) => serde_json::from_value(data).map_err(ClientError::Json),
            (_, None) => Err(ClientError::Format(
                "response carried neither data nor errors".to_string(),
            )),
        }
    }
}

/// Join error messages with `"; "`, keeping their order.
pub fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
