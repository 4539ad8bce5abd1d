//! Transaction history types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::account::WalletCurrency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Success,
    Pending,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionDirection {
    Send,
    Receive,
}

/// How a transaction was initiated.
///
/// Serialized with an internal `type` tag:
///
/// ```text
/// {"type":"lightning","paymentHash":"..."}
/// {"type":"onchain","address":"bc1..."}
/// {"type":"intraledger","counterPartyUsername":null}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum InitiationVia {
    Lightning { payment_hash: String },
    OnChain { address: String },
    IntraLedger { counter_party_username: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub status: TransactionStatus,
    pub direction: TransactionDirection,
    pub memo: Option<String>,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    /// Signed amount in minor units of `settlement_currency`.
    pub settlement_amount: i64,
    pub settlement_currency: WalletCurrency,
    pub settlement_display_amount: String,
    pub initiation_via: InitiationVia,
}

/// Cursor pagination metadata. Cursors are opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// One page of a wallet's transactions, newest first as returned by Blink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub page_info: PageInfo,
}
