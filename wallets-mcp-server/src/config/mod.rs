//! Configuration module for wallets-mcp-server.
//!
//! Settings come from CLI flags or the environment (a `.env` file is loaded
//! into the environment first). Everything is validated here, before any
//! socket is bound or upstream request issued.

mod args;

pub use args::Args;

use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;
use wallets_mcp_sdk::config::{BlinkConfig, BlinkConfigError};

/// Name announced in `initialize` responses and startup logs.
pub const SERVER_NAME: &str = "bitcoin-wallets-for-agents-mcp";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVariable(&'static str),

    #[error("MCP_ACME_EMAIL is required when MCP_DOMAIN is set")]
    MissingAcmeEmail,

    #[error(transparent)]
    Blink(#[from] BlinkConfigError),
}

/// Public HTTPS settings, present when a domain is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpsConfig {
    pub domain: String,
    pub email: String,
    pub https_port: u16,
    pub staging: bool,
}

/// Settings for the inbound MCP endpoint.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    /// Inbound API key. `None` disables authentication.
    pub api_key: Option<String>,
    pub https: Option<HttpsConfig>,
}

/// Everything the server needs to start.
#[derive(Debug)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub blink: BlinkConfig,
}

/// Turns parsed [`Args`] into validated configuration.
pub struct ConfigLoader {
    args: Args,
}

impl ConfigLoader {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    pub fn load(self) -> Result<LoadedConfig, ConfigError> {
        let args = self.args;
        let server = ServerConfig {
            listen: args
                .listen
                .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.port))),
            api_key: non_empty(args.api_key),
            https: https_config(
                non_empty(args.domain),
                non_empty(args.acme_email),
                args.https_port,
                &args.acme_staging,
            )?,
        };

        let blink_api_key =
            non_empty(args.blink_api_key).ok_or(ConfigError::MissingVariable("BLINK_API_KEY"))?;
        let blink = BlinkConfig::new(blink_api_key, non_empty(args.blink_endpoint).as_deref())?;

        Ok(LoadedConfig { server, blink })
    }
}

fn https_config(
    domain: Option<String>,
    email: Option<String>,
    https_port: u16,
    staging: &str,
) -> Result<Option<HttpsConfig>, ConfigError> {
    let Some(domain) = domain else {
        return Ok(None);
    };
    let email = email.ok_or(ConfigError::MissingAcmeEmail)?;
    Ok(Some(HttpsConfig {
        domain,
        email,
        https_port,
        staging: staging.eq_ignore_ascii_case("true"),
    }))
}

/// Unset and empty variables are treated alike.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
