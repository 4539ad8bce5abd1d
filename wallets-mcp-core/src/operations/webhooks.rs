use kanau::processor::Processor;
use serde::Deserialize;
use wallets_mcp_sdk::objects::Webhook;

use crate::error::OperationError;
use crate::framework::BlinkProcessor;

const CALLBACK_ENDPOINTS_QUERY: &str = r#"
query CallbackEndpoints {
  me {
    defaultAccount {
      callbackEndpoints {
        id
        url
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct CallbackEndpointsData {
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
    callback_endpoints: Vec<Webhook>,
}

/// List the callback endpoints registered on the account.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetWebhooks;

impl Processor<GetWebhooks> for BlinkProcessor {
    type Output = Vec<Webhook>;
    type Error = OperationError;
    #[tracing::instrument(skip_all, err, name = "GQL:GetWebhooks")]
    async fn process(&self, _query: GetWebhooks) -> Result<Vec<Webhook>, OperationError> {
        let data: CallbackEndpointsData = self
            .client
            .query(CALLBACK_ENDPOINTS_QUERY)
            .await
            .map_err(OperationError::wrap("Failed to get webhooks from Blink"))?;
        Ok(data.me.default_account.callback_endpoints)
    }
}
