//! Outgoing payments: BOLT11 invoices, Lightning addresses and LNURL.

use kanau::processor::Processor;
use serde::{Deserialize, Serialize};
use wallets_mcp_sdk::client::GraphqlError;
use wallets_mcp_sdk::objects::{PaymentResult, PaymentStatus};

use crate::error::{OperationError, check_business_errors};
use crate::framework::BlinkProcessor;

const LN_INVOICE_PAYMENT_SEND_MUTATION: &str = r#"
mutation LnInvoicePaymentSend($input: LnInvoicePaymentInput!) {
  lnInvoicePaymentSend(input: $input) {
    status
    errors {
      message
    }
  }
}
"#;

const LN_ADDRESS_PAYMENT_SEND_MUTATION: &str = r#"
mutation LnAddressPaymentSend($input: LnAddressPaymentSendInput!) {
  lnAddressPaymentSend(input: $input) {
    status
    errors {
      message
    }
  }
}
"#;

const LNURL_PAYMENT_SEND_MUTATION: &str = r#"
mutation LnurlPaymentSend($input: LnurlPaymentSendInput!) {
  lnurlPaymentSend(input: $input) {
    status
    errors {
      message
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct Variables<T: Serialize> {
    input: T,
}

/// `PaymentSendPayload` shared by all send mutations.
#[derive(Debug, Deserialize)]
struct PaymentPayload {
    status: Option<PaymentStatus>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

impl PaymentPayload {
    fn into_result(self, failure_prefix: &str) -> Result<PaymentResult, OperationError> {
        check_business_errors(failure_prefix, &self.errors)?;
        let status = self
            .status
            .ok_or_else(|| OperationError::missing_result("Payment returned no status"))?;
        Ok(PaymentResult { status })
    }
}

// ---------------------------------------------------------------------------
// BOLT11 invoice
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LnInvoicePaymentInput<'a> {
    wallet_id: &'a str,
    payment_request: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    memo: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LnInvoicePaymentSendData {
    ln_invoice_payment_send: PaymentPayload,
}

/// Pay a BOLT11 invoice from a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayInvoice {
    pub wallet_id: String,
    pub payment_request: String,
    pub memo: Option<String>,
}

impl Processor<PayInvoice> for BlinkProcessor {
    type Output = PaymentResult;
    type Error = OperationError;
    #[tracing::instrument(skip_all, err, name = "GQL:LnInvoicePaymentSend", fields(wallet_id = %query.wallet_id))]
    async fn process(&self, query: PayInvoice) -> Result<PaymentResult, OperationError> {
        let variables = Variables {
            input: LnInvoicePaymentInput {
                wallet_id: &query.wallet_id,
                payment_request: &query.payment_request,
                memo: query.memo.as_deref().filter(|m| !m.is_empty()),
            },
        };

        let data: LnInvoicePaymentSendData = self
            .client
            .execute(LN_INVOICE_PAYMENT_SEND_MUTATION, &variables)
            .await
            .map_err(OperationError::wrap("Failed to pay invoice"))?;

        data.ln_invoice_payment_send.into_result("Payment failed")
    }
}

// ---------------------------------------------------------------------------
// Lightning address
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LnAddressPaymentSendInput<'a> {
    wallet_id: &'a str,
    ln_address: &'a str,
    amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    memo: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LnAddressPaymentSendData {
    ln_address_payment_send: PaymentPayload,
}

/// Send satoshis to a Lightning address (`user@domain`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendToLnAddress {
    pub wallet_id: String,
    pub ln_address: String,
    pub amount: u64,
    pub memo: Option<String>,
}

impl Processor<SendToLnAddress> for BlinkProcessor {
    type Output = PaymentResult;
    type Error = OperationError;
    #[tracing::instrument(skip_all, err, name = "GQL:LnAddressPaymentSend", fields(wallet_id = %query.wallet_id, amount = query.amount))]
    async fn process(&self, query: SendToLnAddress) -> Result<PaymentResult, OperationError> {
        let variables = Variables {
            input: LnAddressPaymentSendInput {
                wallet_id: &query.wallet_id,
                ln_address: &query.ln_address,
                amount: query.amount,
                memo: query.memo.as_deref().filter(|m| !m.is_empty()),
            },
        };

        let data: LnAddressPaymentSendData = self
            .client
            .execute(LN_ADDRESS_PAYMENT_SEND_MUTATION, &variables)
            .await
            .map_err(OperationError::wrap("Failed to send to Lightning address"))?;

        data.ln_address_payment_send
            .into_result("Payment to Lightning address failed")
    }
}

// ---------------------------------------------------------------------------
// LNURL
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LnurlPaymentSendInput<'a> {
    wallet_id: &'a str,
    lnurl: &'a str,
    amount: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LnurlPaymentSendData {
    lnurl_payment_send: PaymentPayload,
}

/// Send satoshis to an LNURL payRequest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendToLnurl {
    pub wallet_id: String,
    pub lnurl: String,
    pub amount: u64,
}

impl Processor<SendToLnurl> for BlinkProcessor {
    type Output = PaymentResult;
    type Error = OperationError;
    #[tracing::instrument(skip_all, err, name = "GQL:LnurlPaymentSend", fields(wallet_id = %query.wallet_id, amount = query.amount))]
    async fn process(&self, query: SendToLnurl) -> Result<PaymentResult, OperationError> {
        let variables = Variables {
            input: LnurlPaymentSendInput {
                wallet_id: &query.wallet_id,
                lnurl: &query.lnurl,
                amount: query.amount,
            },
        };

        let data: LnurlPaymentSendData = self
            .client
            .execute(LNURL_PAYMENT_SEND_MUTATION, &variables)
            .await
            .map_err(OperationError::wrap("Failed to send via LNURL"))?;

        data.lnurl_payment_send.into_result("LNURL payment failed")
    }
}
