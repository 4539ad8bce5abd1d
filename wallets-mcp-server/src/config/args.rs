use std::net::SocketAddr;

use clap::Parser;

/// Bitcoin wallets MCP server - Blink wallet tools for agents
#[derive(Parser, Debug, Clone)]
#[command(name = "wallets-mcp-server")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Port to listen on (all interfaces)
    #[arg(long, env = "MCP_PORT", default_value_t = 3000, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Override the listen address as a whole (e.g., 127.0.0.1:3000)
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,

    /// API key clients must send in the `x-api-key` header
    #[arg(long, env = "MCP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Public domain name; enables HTTPS mode
    #[arg(long, env = "MCP_DOMAIN")]
    pub domain: Option<String>,

    /// ACME account email (required with --domain)
    #[arg(long, env = "MCP_ACME_EMAIL")]
    pub acme_email: Option<String>,

    /// Public HTTPS port
    #[arg(long, env = "MCP_HTTPS_PORT", default_value_t = 443, value_parser = clap::value_parser!(u16).range(1..))]
    pub https_port: u16,

    /// Use the ACME staging directory ("true" to enable)
    #[arg(long, env = "MCP_ACME_STAGING", default_value = "false")]
    pub acme_staging: String,

    /// Blink API key (starts with `blink_`)
    #[arg(long, env = "BLINK_API_KEY", hide_env_values = true)]
    pub blink_api_key: Option<String>,

    /// Blink GraphQL endpoint
    #[arg(long, env = "BLINK_ENDPOINT")]
    pub blink_endpoint: Option<String>,
}
