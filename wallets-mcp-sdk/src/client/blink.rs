//! Blink GraphQL transport.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::ClientError;
use super::graphql::{GraphqlRequest, GraphqlResponse};
use crate::config::BlinkConfig;

/// Header carrying the Blink API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Upper bound for a single upstream round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed GraphQL client for the Blink API.
///
/// Every call is exactly one `POST` to the configured endpoint. Nothing is
/// retried. The client is cheap to clone (the inner `reqwest::Client` is
/// reference counted), so build it once and share it.
#[derive(Clone)]
pub struct BlinkClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl BlinkClient {
    /// Create a new `BlinkClient` with a [`DEFAULT_TIMEOUT`] request timeout.
    pub fn new(config: &BlinkConfig) -> Self {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            endpoint: config.endpoint().clone(),
            api_key: config.api_key().to_owned(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run a document that takes no variables.
    pub async fn query<T: DeserializeOwned>(&self, document: &str) -> Result<T, ClientError> {
        self.send(&GraphqlRequest::<()> {
            query: document,
            variables: None,
        })
        .await
    }

    /// Run a document with the given variables.
    pub async fn execute<V, T>(&self, document: &str, variables: &V) -> Result<T, ClientError>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.send(&GraphqlRequest {
            query: document,
            variables: Some(variables),
        })
        .await
    }

    async fn send<V, T>(&self, request: &GraphqlRequest<'_, V>) -> Result<T, ClientError>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "Blink returned a non-success status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_owned(),
            });
        }

        let bytes = resp.bytes().await?;
        let envelope: GraphqlResponse = serde_json::from_slice(&bytes)?;
        envelope.into_data()
    }
}

impl std::fmt::Debug for BlinkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlinkClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}
