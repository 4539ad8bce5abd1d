//! MCP JSON-RPC dispatch.
//!
//! The server is stateless: every `POST /mcp` carries one JSON-RPC message
//! and is answered with one JSON body (or `202 Accepted` for notifications
//! and client responses). No `Mcp-Session-Id` is issued.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::{Value, json};
use wallets_mcp_core::tools::ToolError;
use wallets_mcp_sdk::objects::mcp::{
    CallToolParams, CallToolResult, Implementation, InitializeResult, JSONRPC_VERSION,
    JsonRpcRequest, JsonRpcResponse, ServerCapabilities, error_codes, negotiate_protocol_version,
};

use crate::api::extractors::ApiKeyAuth;
use crate::config::SERVER_NAME;
use crate::state::AppState;

/// Build the MCP router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/mcp",
        post(handle_post)
            .get(method_not_allowed)
            .delete(method_not_allowed),
    )
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Transport-level failures, answered before any method is dispatched.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Parse error: {0}")]
    Parse(serde_json::Error),
    #[error("Invalid Request: {message}")]
    InvalidRequest { id: Option<Value>, message: String },
    #[error("Internal server error")]
    Internal(#[source] serde_json::Error),
}

impl IntoResponse for McpError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            McpError::Parse(_) => (
                StatusCode::BAD_REQUEST,
                JsonRpcResponse::error(None, error_codes::PARSE_ERROR, self.to_string()),
            ),
            McpError::InvalidRequest { id, .. } => (
                StatusCode::BAD_REQUEST,
                JsonRpcResponse::error(id.clone(), error_codes::INVALID_REQUEST, self.to_string()),
            ),
            McpError::Internal(e) => {
                tracing::error!(error = %e, "MCP request error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    JsonRpcResponse::error(None, error_codes::INTERNAL_ERROR, self.to_string()),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

async fn handle_post(
    _auth: ApiKeyAuth,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, McpError> {
    let message: Value = serde_json::from_slice(&body).map_err(McpError::Parse)?;

    let Value::Object(object) = &message else {
        return Err(McpError::InvalidRequest {
            id: None,
            message: "expected a single JSON-RPC message object".to_owned(),
        });
    };
    let id = object.get("id").cloned();

    // A client answering a server request; nothing to do in a tools-only server.
    if !object.contains_key("method")
        && (object.contains_key("result") || object.contains_key("error"))
    {
        return Ok(StatusCode::ACCEPTED.into_response());
    }

    let request: JsonRpcRequest =
        serde_json::from_value(message).map_err(|e| McpError::InvalidRequest {
            id: id.clone(),
            message: e.to_string(),
        })?;
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(McpError::InvalidRequest {
            id,
            message: format!("unsupported jsonrpc version {:?}", request.jsonrpc),
        });
    }

    if request.is_notification() {
        tracing::debug!(method = %request.method, "MCP notification");
        return Ok(StatusCode::ACCEPTED.into_response());
    }

    let response = dispatch(&state, request).await.map_err(McpError::Internal)?;
    Ok(Json(response).into_response())
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(JsonRpcResponse::error(
            None,
            error_codes::CONNECTION_CLOSED,
            "Method not allowed.",
        )),
    )
}

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeParams {
    protocol_version: Option<String>,
    client_info: Option<Implementation>,
}

/// Answer one JSON-RPC request. Errors are only returned when a result
/// cannot be serialized.
async fn dispatch(
    state: &AppState,
    request: JsonRpcRequest,
) -> Result<JsonRpcResponse, serde_json::Error> {
    let id = request.id;
    let params = request.params.unwrap_or(Value::Null);

    let response = match request.method.as_str() {
        "initialize" => {
            let params: InitializeParams = serde_json::from_value(params).unwrap_or_default();
            if let Some(client) = &params.client_info {
                tracing::info!(client = %client.name, version = %client.version, "MCP client connected");
            }
            let result = InitializeResult {
                protocol_version: negotiate_protocol_version(params.protocol_version.as_deref())
                    .to_owned(),
                capabilities: ServerCapabilities::default(),
                server_info: Implementation {
                    name: SERVER_NAME.to_owned(),
                    version: env!("CARGO_PKG_VERSION").to_owned(),
                },
            };
            JsonRpcResponse::success(id, serde_json::to_value(result)?)
        }
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": state.tools.definitions() })),
        "tools/call" => {
            let params: CallToolParams = match serde_json::from_value(params) {
                Ok(params) => params,
                Err(e) => {
                    return Ok(JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid params: {e}"),
                    ));
                }
            };
            match call_tool(state, params).await {
                Ok(result) => JsonRpcResponse::success(id, serde_json::to_value(result)?),
                Err((code, message)) => JsonRpcResponse::error(id, code, message),
            }
        }
        other => JsonRpcResponse::error(
            id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
        ),
    };
    Ok(response)
}

/// Run a tool. Operation failures become an `isError` result the agent can
/// read; everything else is a JSON-RPC error.
async fn call_tool(
    state: &AppState,
    params: CallToolParams,
) -> Result<CallToolResult, (i32, String)> {
    let name = params.name;
    match state
        .tools
        .call(&name, params.arguments, &state.processor)
        .await
    {
        Ok(result) => Ok(result),
        Err(ToolError::Operation(err)) => {
            tracing::warn!(tool = %name, kind = %err.kind(), error = %error_chain(&err), "Tool call failed");
            Ok(CallToolResult::error(error_chain(&err)))
        }
        Err(ToolError::InvalidArguments(message)) => Err((
            error_codes::INVALID_PARAMS,
            format!("Invalid arguments for tool {name}: {message}"),
        )),
        Err(ToolError::UnknownTool(name)) => {
            Err((error_codes::INVALID_PARAMS, format!("Tool {name} not found")))
        }
        Err(err @ ToolError::Serialize(_)) => {
            tracing::error!(tool = %name, error = %err, "Tool result serialization failed");
            Err((error_codes::INTERNAL_ERROR, err.to_string()))
        }
    }
}

/// The error followed by each of its causes, separated by `": "`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::server::build_router;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use wallets_mcp_core::framework::BlinkProcessor;
    use wallets_mcp_sdk::client::BlinkClient;
    use wallets_mcp_sdk::config::BlinkConfig;
    use wallets_mcp_sdk::mock::MockUpstream;

    fn app(upstream: &MockUpstream, api_key: Option<&str>) -> Router {
        let config = BlinkConfig::new("blink_test_key", Some(upstream.url().as_str())).unwrap();
        let state = AppState::new(
            BlinkProcessor::new(BlinkClient::new(&config)),
            ServerConfig {
                listen: "127.0.0.1:0".parse().unwrap(),
                api_key: api_key.map(str::to_owned),
                https: None,
            },
        );
        build_router(state)
    }

    fn post_mcp(body: impl Into<String>, api_key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/mcp")
            .header("content-type", "application/json");
        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::from(body.into())).unwrap()
    }

    fn call(method: &str, params: Value) -> String {
        json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": params}).to_string()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn tool_payload(body: &Value) -> Value {
        let text = body["result"]["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_rejects_missing_and_wrong_api_key() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();

        for key in [None, Some("wrong")] {
            let (status, body) = send(
                app(&upstream, Some("secret")),
                post_mcp(call("tools/list", json!({})), key),
            )
            .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(
                body,
                json!({
                    "jsonrpc": "2.0",
                    "error": {"code": -32001, "message": "Unauthorized: Invalid API key"},
                    "id": null
                })
            );
        }
    }

    #[tokio::test]
    async fn test_accepts_matching_api_key() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();
        let (status, body) = send(
            app(&upstream, Some("secret")),
            post_mcp(call("ping", json!({})), Some("secret")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], json!({}));
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_no_api_key_configured_allows_everything() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();
        let (status, _) = send(app(&upstream, None), post_mcp(call("ping", json!({})), None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_initialize() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();
        let (status, body) = send(
            app(&upstream, None),
            post_mcp(
                call(
                    "initialize",
                    json!({
                        "protocolVersion": "2025-03-26",
                        "capabilities": {},
                        "clientInfo": {"name": "test-agent", "version": "1.0"}
                    }),
                ),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(
            body["result"]["serverInfo"]["name"],
            "bitcoin-wallets-for-agents-mcp"
        );
        assert_eq!(body["result"]["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_null_id_gets_a_response() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();
        let (status, body) = send(
            app(&upstream, None),
            post_mcp(
                json!({"jsonrpc": "2.0", "id": null, "method": "ping"}).to_string(),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], Value::Null);
        assert_eq!(body["result"], json!({}));
    }

    #[tokio::test]
    async fn test_notification_is_accepted() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();
        let (status, body) = send(
            app(&upstream, None),
            post_mcp(
                json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();
        let (_, body) = send(app(&upstream, None), post_mcp(call("tools/list", json!({})), None)).await;
        let tools = body["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        assert_eq!(tools[0]["name"], "blink_get_account");
        assert_eq!(tools[4]["name"], "blink_pay_invoice");
        assert_eq!(
            tools[4]["inputSchema"]["required"],
            json!(["walletId", "paymentRequest"])
        );
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let upstream = MockUpstream::json(json!({
            "data": {"me": {"defaultAccount": {
                "defaultWalletId": "w1",
                "wallets": [
                    {"id": "w1", "walletCurrency": "BTC", "balance": 1234, "pendingIncomingBalance": 0}
                ]
            }}}
        }))
        .await
        .unwrap();

        let (status, body) = send(
            app(&upstream, None),
            post_mcp(call("tools/call", json!({"name": "blink_get_account"})), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["result"].get("isError").is_none());
        let payload = tool_payload(&body);
        assert_eq!(payload["success"], true);
        assert_eq!(payload["account"]["wallets"][0]["balance"], 1234);
    }

    #[tokio::test]
    async fn test_tools_call_operation_failure_is_error_result() {
        let upstream = MockUpstream::start(500, "").await.unwrap();

        let (status, body) = send(
            app(&upstream, None),
            post_mcp(
                call("tools/call", json!({"name": "blink_get_account", "arguments": {}})),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["isError"], true);
        assert_eq!(
            body["result"]["content"][0]["text"],
            "Failed to get account from Blink: HTTP error: 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_tools_call_invalid_arguments() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();

        let (status, body) = send(
            app(&upstream, None),
            post_mcp(
                call(
                    "tools/call",
                    json!({"name": "blink_create_btc_invoice", "arguments": {"walletId": "w1", "amount": 0}}),
                ),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"]["code"], error_codes::INVALID_PARAMS);
        assert_eq!(upstream.request_count(), 0);
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();
        let (_, body) = send(
            app(&upstream, None),
            post_mcp(call("tools/call", json!({"name": "blink_nope"})), None),
        )
        .await;
        assert_eq!(body["error"]["code"], error_codes::INVALID_PARAMS);
        assert_eq!(body["error"]["message"], "Tool blink_nope not found");
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();

        let (status, body) = send(app(&upstream, None), post_mcp("{not json", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], error_codes::PARSE_ERROR);
        assert_eq!(body["id"], Value::Null);

        let (status, body) = send(app(&upstream, None), post_mcp("[1, 2]", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], error_codes::INVALID_REQUEST);

        let (status, body) = send(
            app(&upstream, None),
            post_mcp(call("resources/list", json!({})), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"]["code"], error_codes::METHOD_NOT_FOUND);
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_get_and_delete_not_allowed() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();
        for method in ["GET", "DELETE"] {
            let request = Request::builder()
                .method(method)
                .uri("/mcp")
                .body(Body::empty())
                .unwrap();
            let (status, body) = send(app(&upstream, None), request).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body["error"]["code"], error_codes::CONNECTION_CLOSED);
        }
    }

    #[tokio::test]
    async fn test_health_needs_no_auth() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(&upstream, Some("secret")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[test]
    fn test_error_chain() {
        #[derive(Debug, thiserror::Error)]
        #[error("outer")]
        struct Outer(#[source] std::io::Error);

        let err = Outer(std::io::Error::other("inner"));
        assert_eq!(error_chain(&err), "outer: inner");
    }
}
