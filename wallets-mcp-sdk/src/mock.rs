//! In-process stand-in for the Blink GraphQL endpoint.
//!
//! Serves one canned response to every `POST /graphql` and records what it
//! received. Used by tests in this workspace (feature `mock`).

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use serde_json::Value;
use url::Url;

/// A request captured by [`MockUpstream`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Value of the `X-API-KEY` header, if any.
    pub api_key: Option<String>,
    /// Parsed JSON body (`Value::Null` if the body was not JSON).
    pub body: Value,
}

pub struct MockUpstream {
    url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    /// Start a mock answering every request with `status` and `body`.
    pub async fn start(status: u16, body: impl Into<String>) -> std::io::Result<Self> {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body: String = body.into();
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();

        let recorder = requests.clone();
        let app = Router::new().route(
            "/graphql",
            post(move |headers: HeaderMap, raw: String| {
                let recorder = recorder.clone();
                let body = body.clone();
                async move {
                    let api_key = headers
                        .get("x-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned);
                    let parsed = serde_json::from_str(&raw).unwrap_or(Value::Null);
                    recorder
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .push(RecordedRequest {
                            api_key,
                            body: parsed,
                        });
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let url = Url::parse(&format!("http://{addr}/graphql"))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        Ok(Self { url, requests })
    }

    /// Start a mock answering `200 OK` with the given JSON document.
    pub async fn json(body: Value) -> std::io::Result<Self> {
        Self::start(200, body.to_string()).await
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
