//! Bitcoin wallets MCP server
//!
//! Exposes a Blink wallet to agents as a set of MCP tools over HTTP.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{Args, ConfigLoader};
use server::{build_router, run_server};
use state::AppState;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wallets_mcp_core::framework::BlinkProcessor;
use wallets_mcp_sdk::client::BlinkClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies
    let dotenv = dotenvy::dotenv();

    init_tracing();

    if let Err(e) = &dotenv
        && !e.not_found()
    {
        tracing::warn!("Failed to load .env file: {}", e);
    }

    let args = Args::parse();

    tracing::info!(
        "Starting {} v{}",
        config::SERVER_NAME,
        env!("CARGO_PKG_VERSION")
    );

    let loaded = ConfigLoader::new(args).load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    let server_config = loaded.server;

    let client = BlinkClient::new(&loaded.blink);
    tracing::info!("Blink endpoint: {}", client.endpoint());

    match &server_config.https {
        Some(https) => {
            tracing::info!(
                domain = %https.domain,
                staging = https.staging,
                "MCP_DOMAIN configured; TLS is expected to be terminated in front of this server"
            );
            tracing::info!(
                "Public endpoint: https://{}:{}/mcp",
                https.domain,
                https.https_port
            );
        }
        None => {
            tracing::info!("No MCP_DOMAIN configured - running in HTTP mode");
        }
    }

    if server_config.api_key.is_none() {
        tracing::warn!("No MCP_API_KEY configured - running without authentication");
    } else {
        tracing::info!("API key authentication enabled");
    }

    let listen_addr = server_config.listen;
    let state = AppState::new(BlinkProcessor::new(client), server_config);
    let router = build_router(state);

    tracing::info!("MCP server listening on http://{}/mcp", listen_addr);
    run_server(router, listen_addr).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
