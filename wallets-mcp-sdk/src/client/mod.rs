//! HTTP client for the Blink GraphQL API.
//!
//! Gated behind the `client` cargo feature so crates that only need the
//! shared types do not pull in `reqwest`.

mod blink;
mod graphql;

pub use blink::{API_KEY_HEADER, BlinkClient, DEFAULT_TIMEOUT};
pub use graphql::{GraphqlError, join_messages};

/// Errors produced by the GraphQL transport.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection-level failure (DNS, TLS, connection reset, timeout, …).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Blink answered with a non-2xx status. The body is not inspected.
    #[error("HTTP error: {status} {reason}")]
    Status { status: u16, reason: String },

    /// The envelope carried a non-empty top-level `errors` array.
    #[error("Blink API error: {}", join_messages(.0))]
    Api(Vec<GraphqlError>),

    /// The envelope carried neither `errors` nor `data`, or `data` had an
    /// unexpected shape.
    #[error("Unexpected response format from Blink API: {0}")]
    Format(String),

    /// The body was not valid JSON for the expected shape.
    #[error("Unexpected response format from Blink API: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_joins_messages_in_order() {
        let errors: Vec<GraphqlError> = serde_json::from_str(
            r#"[{"message":"first"},{"message":"second","path":["me"]},{"message":"third"}]"#,
        )
        .unwrap();
        let err = ClientError::Api(errors);
        assert_eq!(err.to_string(), "Blink API error: first; second; third");
    }

    #[test]
    fn test_status_error_message() {
        let err = ClientError::Status {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error: 503 Service Unavailable");
    }
}
