use wallets_mcp_sdk::client::BlinkClient;

/// Executes catalog operations against Blink.
///
/// Each operation in [`crate::operations`] is a `kanau` processor input for
/// this type. Build it once from the resolved configuration and share it.
#[derive(Debug, Clone)]
pub struct BlinkProcessor {
    pub client: BlinkClient,
}

impl BlinkProcessor {
    pub fn new(client: BlinkClient) -> Self {
        Self { client }
    }
}
