//! Custom Axum extractors for request authentication.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use wallets_mcp_sdk::objects::mcp::{JsonRpcResponse, error_codes};

use crate::state::AppState;

/// Header clients use to present the inbound API key.
pub const API_KEY_HEADER: &str = "x-api-key";

// ---------------------------------------------------------------------------
// ApiKeyAuth: inbound MCP authentication
// ---------------------------------------------------------------------------

/// An Axum extractor that checks the `x-api-key` header against the
/// configured `MCP_API_KEY`.
///
/// When no key is configured every request is accepted.
pub struct ApiKeyAuth;

#[derive(Debug, thiserror::Error)]
pub enum ApiKeyAuthError {
    #[error("missing or invalid x-api-key header")]
    Unauthorized,
}

impl IntoResponse for ApiKeyAuthError {
    fn into_response(self) -> Response {
        let body = JsonRpcResponse::error(
            None,
            error_codes::UNAUTHORIZED,
            "Unauthorized: Invalid API key",
        );
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = ApiKeyAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.api_key.as_deref() else {
            return Ok(ApiKeyAuth);
        };

        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        if provided == Some(expected) {
            Ok(ApiKeyAuth)
        } else {
            tracing::warn!("Rejected MCP request with missing or invalid API key");
            Err(ApiKeyAuthError::Unauthorized)
        }
    }
}
