//! Application state shared across all request handlers.

use std::sync::Arc;

use wallets_mcp_core::framework::BlinkProcessor;
use wallets_mcp_core::tools::ToolRegistry;

use crate::config::ServerConfig;

/// Application state that is shared across all request handlers.
///
/// Cheap to clone: the registry and config are behind `Arc`, and the Blink
/// client inside the processor is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub processor: BlinkProcessor,
    pub tools: Arc<ToolRegistry>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(processor: BlinkProcessor, config: ServerConfig) -> Self {
        Self {
            processor,
            tools: Arc::new(ToolRegistry::new()),
            config: Arc::new(config),
        }
    }
}
