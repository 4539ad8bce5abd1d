//! Read-only tools: account, transaction history, webhooks.

use async_trait::async_trait;
use kanau::processor::Processor;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wallets_mcp_sdk::objects::mcp::{CallToolResult, ToolDefinition};
use wallets_mcp_sdk::objects::{Account, Webhook};

use super::{ToolError, WalletTool, parse_args, require_non_empty, success};
use crate::framework::BlinkProcessor;
use crate::operations::{DEFAULT_PAGE_SIZE, GetAccount, GetTransactions, GetWebhooks};

pub struct GetAccountTool;

#[derive(Serialize)]
struct AccountPayload {
    account: Account,
}

#[async_trait]
impl WalletTool for GetAccountTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "blink_get_account",
            "Get Blink account info including wallet IDs and balances (BTC in satoshis, USD in cents)",
        )
    }

    async fn call(
        &self,
        _args: Value,
        processor: &BlinkProcessor,
    ) -> Result<CallToolResult, ToolError> {
        let account = processor.process(GetAccount).await?;
        success(AccountPayload { account })
    }
}

pub struct GetTransactionsTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetTransactionsArgs {
    wallet_id: String,
    first: Option<u32>,
    after: Option<String>,
}

#[async_trait]
impl WalletTool for GetTransactionsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "blink_get_transactions",
            "Get transaction history for a Blink wallet with pagination",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "walletId": {
                    "type": "string",
                    "description": "Wallet ID to get transactions for"
                },
                "first": {
                    "type": "integer",
                    "minimum": 1,
                    "description": format!("Number of transactions to return (default: {DEFAULT_PAGE_SIZE})")
                },
                "after": {
                    "type": "string",
                    "description": "Cursor for pagination (from previous pageInfo.endCursor)"
                }
            },
            "required": ["walletId"]
        }))
    }

    async fn call(
        &self,
        args: Value,
        processor: &BlinkProcessor,
    ) -> Result<CallToolResult, ToolError> {
        let args: GetTransactionsArgs = parse_args(args)?;
        require_non_empty("walletId", &args.wallet_id)?;
        if args.first == Some(0) {
            return Err(ToolError::InvalidArguments(
                "first must be a positive integer".to_owned(),
            ));
        }
        tracing::info!(wallet_id = %args.wallet_id, first = ?args.first, "Listing transactions");

        let page = processor
            .process(GetTransactions {
                wallet_id: args.wallet_id,
                first: args.first,
                after: args.after,
            })
            .await?;
        success(page)
    }
}

pub struct GetWebhooksTool;

#[derive(Serialize)]
struct WebhooksPayload {
    webhooks: Vec<Webhook>,
}

#[async_trait]
impl WalletTool for GetWebhooksTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "blink_get_webhooks",
            "List all registered Blink webhook endpoints",
        )
    }

    async fn call(
        &self,
        _args: Value,
        processor: &BlinkProcessor,
    ) -> Result<CallToolResult, ToolError> {
        let webhooks = processor.process(GetWebhooks).await?;
        success(WebhooksPayload { webhooks })
    }
}
