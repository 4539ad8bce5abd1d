use kanau::processor::Processor;
use serde::Deserialize;
use wallets_mcp_sdk::objects::{Account, Wallet};

use crate::error::OperationError;
use crate::framework::BlinkProcessor;

const ME_QUERY: &str = r#"
query Me {
  me {
    defaultAccount {
      defaultWalletId
      wallets {
        id
        walletCurrency
        balance
        pendingIncomingBalance
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct MeData {
    me: Me,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Me {
    default_account: DefaultAccount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefaultAccount {
    default_wallet_id: String,
    wallets: Vec<Wallet>,
}

impl From<DefaultAccount> for Account {
    fn from(value: DefaultAccount) -> Self {
        Account {
            default_wallet_id: value.default_wallet_id,
            wallets: value.wallets,
        }
    }
}

/// Fetch the default wallet id and every wallet with its balances.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAccount;

impl Processor<GetAccount> for BlinkProcessor {
    type Output = Account;
    type Error = OperationError;
    #[tracing::instrument(skip_all, err, name = "GQL:GetAccount")]
    async fn process(&self, _query: GetAccount) -> Result<Account, OperationError> {
        let data: MeData = self
            .client
            .query(ME_QUERY)
            .await
            .map_err(OperationError::wrap("Failed to get account from Blink"))?;
        Ok(data.me.default_account.into())
    }
}
