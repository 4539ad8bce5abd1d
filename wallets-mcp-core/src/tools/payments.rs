//! Tools that move money: invoice creation and outgoing payments.

use async_trait::async_trait;
use kanau::processor::Processor;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wallets_mcp_sdk::objects::Invoice;
use wallets_mcp_sdk::objects::mcp::{CallToolResult, ToolDefinition};

use super::{ToolError, WalletTool, parse_args, require_non_empty, require_positive, success};
use crate::framework::BlinkProcessor;
use crate::operations::{CreateInvoice, PayInvoice, SendToLnAddress, SendToLnurl};

fn wallet_id_schema(description: &str) -> Value {
    json!({"type": "string", "description": description})
}

fn amount_schema() -> Value {
    json!({"type": "integer", "minimum": 1, "description": "Amount in satoshis"})
}

fn memo_schema(description: &str) -> Value {
    json!({"type": "string", "description": description})
}

// ---------------------------------------------------------------------------
// blink_create_btc_invoice
// ---------------------------------------------------------------------------

pub struct CreateBtcInvoiceTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBtcInvoiceArgs {
    wallet_id: String,
    amount: u64,
    memo: Option<String>,
}

#[derive(Serialize)]
struct InvoicePayload {
    invoice: Invoice,
}

#[async_trait]
impl WalletTool for CreateBtcInvoiceTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "blink_create_btc_invoice",
            "Create a Lightning invoice to receive BTC payments",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "walletId": wallet_id_schema("BTC wallet ID to receive payment"),
                "amount": amount_schema(),
                "memo": memo_schema("Optional memo/description for the invoice")
            },
            "required": ["walletId", "amount"]
        }))
    }

    async fn call(
        &self,
        args: Value,
        processor: &BlinkProcessor,
    ) -> Result<CallToolResult, ToolError> {
        let args: CreateBtcInvoiceArgs = parse_args(args)?;
        require_non_empty("walletId", &args.wallet_id)?;
        require_positive("amount", args.amount)?;
        tracing::info!(wallet_id = %args.wallet_id, amount = args.amount, "Creating invoice");

        let invoice = processor
            .process(CreateInvoice {
                wallet_id: args.wallet_id,
                amount: args.amount,
                memo: args.memo,
            })
            .await?;
        success(InvoicePayload { invoice })
    }
}

// ---------------------------------------------------------------------------
// blink_pay_invoice
// ---------------------------------------------------------------------------

pub struct PayInvoiceTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayInvoiceArgs {
    wallet_id: String,
    payment_request: String,
    memo: Option<String>,
}

#[async_trait]
impl WalletTool for PayInvoiceTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "blink_pay_invoice",
            "Pay a BOLT11 Lightning invoice from your wallet. Returns status: SUCCESS, PENDING, ALREADY_PAID, or FAILURE",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "walletId": wallet_id_schema("Wallet ID to pay from"),
                "paymentRequest": {
                    "type": "string",
                    "description": "BOLT11 Lightning invoice to pay"
                },
                "memo": memo_schema("Optional memo for the payment")
            },
            "required": ["walletId", "paymentRequest"]
        }))
    }

    async fn call(
        &self,
        args: Value,
        processor: &BlinkProcessor,
    ) -> Result<CallToolResult, ToolError> {
        let args: PayInvoiceArgs = parse_args(args)?;
        require_non_empty("walletId", &args.wallet_id)?;
        require_non_empty("paymentRequest", &args.payment_request)?;
        tracing::info!(wallet_id = %args.wallet_id, "Paying invoice");

        let result = processor
            .process(PayInvoice {
                wallet_id: args.wallet_id,
                payment_request: args.payment_request,
                memo: args.memo,
            })
            .await?;
        success(result)
    }
}

// ---------------------------------------------------------------------------
// blink_send_to_lnaddress
// ---------------------------------------------------------------------------

pub struct SendToLnAddressTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendToLnAddressArgs {
    wallet_id: String,
    ln_address: String,
    amount: u64,
    memo: Option<String>,
}

#[async_trait]
impl WalletTool for SendToLnAddressTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "blink_send_to_lnaddress",
            "Send satoshis to a Lightning address (e.g., user@blink.sv). Returns status: SUCCESS, PENDING, or FAILURE",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "walletId": wallet_id_schema("Wallet ID to send from"),
                "lnAddress": {
                    "type": "string",
                    "description": "Lightning address (e.g., user@blink.sv)"
                },
                "amount": amount_schema(),
                "memo": memo_schema("Optional memo for the payment")
            },
            "required": ["walletId", "lnAddress", "amount"]
        }))
    }

    async fn call(
        &self,
        args: Value,
        processor: &BlinkProcessor,
    ) -> Result<CallToolResult, ToolError> {
        let args: SendToLnAddressArgs = parse_args(args)?;
        require_non_empty("walletId", &args.wallet_id)?;
        require_non_empty("lnAddress", &args.ln_address)?;
        require_positive("amount", args.amount)?;
        tracing::info!(
            wallet_id = %args.wallet_id,
            ln_address = %args.ln_address,
            amount = args.amount,
            "Sending to Lightning address"
        );

        let result = processor
            .process(SendToLnAddress {
                wallet_id: args.wallet_id,
                ln_address: args.ln_address,
                amount: args.amount,
                memo: args.memo,
            })
            .await?;
        success(result)
    }
}

// ---------------------------------------------------------------------------
// blink_send_to_lnurl
// ---------------------------------------------------------------------------

pub struct SendToLnurlTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendToLnurlArgs {
    wallet_id: String,
    lnurl: String,
    amount: u64,
}

#[async_trait]
impl WalletTool for SendToLnurlTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "blink_send_to_lnurl",
            "Send satoshis via LNURL payRequest. Returns status: SUCCESS, PENDING, or FAILURE",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "walletId": wallet_id_schema("Wallet ID to send from"),
                "lnurl": {
                    "type": "string",
                    "description": "LNURL payRequest string"
                },
                "amount": amount_schema()
            },
            "required": ["walletId", "lnurl", "amount"]
        }))
    }

    async fn call(
        &self,
        args: Value,
        processor: &BlinkProcessor,
    ) -> Result<CallToolResult, ToolError> {
        let args: SendToLnurlArgs = parse_args(args)?;
        require_non_empty("walletId", &args.wallet_id)?;
        require_non_empty("lnurl", &args.lnurl)?;
        require_positive("amount", args.amount)?;
        tracing::info!(wallet_id = %args.wallet_id, amount = args.amount, "Sending via LNURL");

        let result = processor
            .process(SendToLnurl {
                wallet_id: args.wallet_id,
                lnurl: args.lnurl,
                amount: args.amount,
            })
            .await?;
        success(result)
    }
}
