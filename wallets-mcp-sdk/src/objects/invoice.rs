//! Lightning invoices created for receiving funds.

use serde::{Deserialize, Serialize};

/// A freshly created BOLT11 invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// The BOLT11 encoded payment request (`lnbc...`).
    pub payment_request: String,
    pub payment_hash: String,
    pub payment_secret: String,
    pub satoshis: u64,
}
