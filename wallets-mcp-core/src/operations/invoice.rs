use kanau::processor::Processor;
use serde::{Deserialize, Serialize};
use wallets_mcp_sdk::client::GraphqlError;
use wallets_mcp_sdk::objects::Invoice;

use crate::error::{OperationError, check_business_errors};
use crate::framework::BlinkProcessor;

const LN_INVOICE_CREATE_MUTATION: &str = r#"
mutation LnInvoiceCreate($input: LnInvoiceCreateInput!) {
  lnInvoiceCreate(input: $input) {
    invoice {
      paymentRequest
      paymentHash
      paymentSecret
      satoshis
    }
    errors {
      message
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct Variables<'a> {
    input: LnInvoiceCreateInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LnInvoiceCreateInput<'a> {
    wallet_id: &'a str,
    amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    memo: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LnInvoiceCreateData {
    ln_invoice_create: LnInvoicePayload,
}

#[derive(Debug, Deserialize)]
struct LnInvoicePayload {
    invoice: Option<Invoice>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

/// Create a BOLT11 invoice to receive satoshis into a BTC wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvoice {
    pub wallet_id: String,
    /// Amount in satoshis. Validated positive by the tool surface.
    pub amount: u64,
    pub memo: Option<String>,
}

impl Processor<CreateInvoice> for BlinkProcessor {
    type Output = Invoice;
    type Error = OperationError;
    #[tracing::instrument(skip_all, err, name = "GQL:LnInvoiceCreate", fields(wallet_id = %query.wallet_id, amount = query.amount))]
    async fn process(&self, query: CreateInvoice) -> Result<Invoice, OperationError> {
        let variables = Variables {
            input: LnInvoiceCreateInput {
                wallet_id: &query.wallet_id,
                amount: query.amount,
                memo: query.memo.as_deref().filter(|m| !m.is_empty()),
            },
        };

        let data: LnInvoiceCreateData = self
            .client
            .execute(LN_INVOICE_CREATE_MUTATION, &variables)
            .await
            .map_err(OperationError::wrap("Failed to create BTC invoice"))?;

        let payload = data.ln_invoice_create;
        check_business_errors("Invoice creation failed", &payload.errors)?;
        payload
            .invoice
            .ok_or_else(|| OperationError::missing_result("Invoice creation returned no invoice"))
    }
}
