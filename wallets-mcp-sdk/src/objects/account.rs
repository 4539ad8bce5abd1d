//! Account and wallet balances.

use serde::{Deserialize, Serialize};

/// Currency a wallet is denominated in.
///
/// Balances of `Btc` wallets are in satoshis, balances of `Usd` wallets in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WalletCurrency {
    Btc,
    Usd,
}

impl std::fmt::Display for WalletCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletCurrency::Btc => write!(f, "BTC"),
            WalletCurrency::Usd => write!(f, "USD"),
        }
    }
}

/// A single wallet of the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub wallet_currency: WalletCurrency,
    /// Settled balance in minor units.
    pub balance: i64,
    /// Incoming funds not yet settled, in minor units.
    pub pending_incoming_balance: i64,
}

/// The default account of the API key owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Always one of the ids in `wallets` (guaranteed by Blink).
    pub default_wallet_id: String,
    pub wallets: Vec<Wallet>,
}
