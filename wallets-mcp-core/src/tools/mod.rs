//! The agent-facing tool surface.
//!
//! Every catalog operation is registered here as a named tool with a JSON
//! input schema. Arguments are decoded and validated before any upstream
//! request is made; operation failures are returned as [`ToolError::Operation`]
//! and rendered by the protocol layer.

mod payments;
mod wallet;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wallets_mcp_sdk::objects::mcp::{CallToolResult, ToolDefinition};

use crate::error::OperationError;
use crate::framework::BlinkProcessor;

pub use payments::{CreateBtcInvoiceTool, PayInvoiceTool, SendToLnAddressTool, SendToLnurlTool};
pub use wallet::{GetAccountTool, GetTransactionsTool, GetWebhooksTool};

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error(transparent)]
    Operation(#[from] OperationError),
    #[error("Failed to serialize tool result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A callable exposed to agents.
#[async_trait]
pub trait WalletTool: Send + Sync {
    /// Name, description and input schema as advertised by `tools/list`.
    fn definition(&self) -> ToolDefinition;

    /// Validate `args` and run the underlying operation.
    async fn call(&self, args: Value, processor: &BlinkProcessor)
    -> Result<CallToolResult, ToolError>;
}

/// All tools, in advertisement order.
pub struct ToolRegistry {
    tools: Vec<Box<dyn WalletTool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// The full wallet tool set.
    pub fn new() -> Self {
        let mut registry = Self { tools: Vec::new() };

        registry.register(Box::new(GetAccountTool));
        registry.register(Box::new(GetTransactionsTool));
        registry.register(Box::new(GetWebhooksTool));
        registry.register(Box::new(CreateBtcInvoiceTool));
        registry.register(Box::new(PayInvoiceTool));
        registry.register(Box::new(SendToLnAddressTool));
        registry.register(Box::new(SendToLnurlTool));

        registry
    }

    /// Register a tool. Lookup returns the first tool with a given name.
    pub fn register(&mut self, tool: Box<dyn WalletTool>) {
        self.tools.push(tool);
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn WalletTool> {
        self.tools
            .iter()
            .find(|t| t.definition().name == name)
            .map(|t| t.as_ref())
    }

    /// Dispatch a `tools/call` by name.
    pub async fn call(
        &self,
        name: &str,
        args: Value,
        processor: &BlinkProcessor,
    ) -> Result<CallToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_owned()))?;
        tracing::info!(tool = name, "Tool call");
        tool.call(args, processor).await
    }
}

// ---------------------------------------------------------------------------
// Helpers shared by the tool implementations
// ---------------------------------------------------------------------------

/// Decode tool arguments. A missing `arguments` member is an empty object.
fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ToolError> {
    if value.is_empty() {
        return Err(ToolError::InvalidArguments(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

fn require_positive(field: &str, value: u64) -> Result<(), ToolError> {
    if value == 0 {
        return Err(ToolError::InvalidArguments(format!(
            "{field} must be a positive integer"
        )));
    }
    Ok(())
}

#[derive(Serialize)]
struct Success<T: Serialize> {
    success: bool,
    #[serde(flatten)]
    data: T,
}

/// `{"success": true, ...data}` as pretty-printed text content.
fn success<T: Serialize>(data: T) -> Result<CallToolResult, ToolError> {
    let text = serde_json::to_string_pretty(&Success {
        success: true,
        data,
    })?;
    Ok(CallToolResult::text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::testing::processor_for;
    use serde_json::json;
    use wallets_mcp_sdk::mock::MockUpstream;

    #[test]
    fn test_registry_order_and_names() {
        let registry = ToolRegistry::new();
        let names: Vec<String> = registry
            .definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "blink_get_account",
                "blink_get_transactions",
                "blink_get_webhooks",
                "blink_create_btc_invoice",
                "blink_pay_invoice",
                "blink_send_to_lnaddress",
                "blink_send_to_lnurl",
            ]
        );
        for definition in registry.definitions() {
            assert_eq!(definition.input_schema["type"], "object");
            assert!(!definition.description.is_empty());
        }
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let upstream = MockUpstream::json(json!({"data": {}})).await.unwrap();
        let registry = ToolRegistry::new();

        let err = registry
            .call("blink_mint_coins", json!({}), &processor_for(&upstream))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(ref name) if name == "blink_mint_coins"));
        assert_eq!(upstream.request_count(), 0);
    }

    #[test]
    fn test_null_arguments_are_an_empty_object() {
        #[derive(serde::Deserialize)]
        struct NoArgs {}
        assert!(parse_args::<NoArgs>(Value::Null).is_ok());
    }

    #[test]
    fn test_success_payload_shape() {
        #[derive(Serialize)]
        struct Data {
            status: &'static str,
        }
        let result = success(Data { status: "SUCCESS" }).unwrap();
        assert!(!result.is_error);
        let payload: Value = serde_json::from_str(&result.joined_text()).unwrap();
        assert_eq!(payload, json!({"success": true, "status": "SUCCESS"}));
    }
}
