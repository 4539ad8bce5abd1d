//! The GraphQL operation catalog.
//!
//! Each operation is a fixed document plus a `kanau` processor input for
//! [`BlinkProcessor`](crate::framework::BlinkProcessor) that sends it, checks
//! mutation-level errors and adapts the upstream shape into
//! [`wallets_mcp_sdk::objects`].

pub mod account;
pub mod invoice;
pub mod payments;
pub mod transactions;
pub mod webhooks;

pub use account::GetAccount;
pub use invoice::CreateInvoice;
pub use payments::{PayInvoice, SendToLnAddress, SendToLnurl};
pub use transactions::{DEFAULT_PAGE_SIZE, GetTransactions};
pub use webhooks::GetWebhooks;

#[cfg(test)]
pub(crate) mod testing {
    use crate::framework::BlinkProcessor;
    use wallets_mcp_sdk::client::BlinkClient;
    use wallets_mcp_sdk::config::BlinkConfig;
    use wallets_mcp_sdk::mock::MockUpstream;

    pub fn processor_for(upstream: &MockUpstream) -> BlinkProcessor {
        let config = BlinkConfig::new("blink_test_key", Some(upstream.url().as_str())).unwrap();
        BlinkProcessor::new(BlinkClient::new(&config))
    }
}
