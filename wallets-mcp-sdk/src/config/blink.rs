//! Blink connection settings.

use url::Url;

/// Every Blink API key starts with this literal.
pub const BLINK_API_KEY_PREFIX: &str = "blink_";

/// The public Blink GraphQL endpoint.
pub const DEFAULT_BLINK_ENDPOINT: &str = "https://api.blink.sv/graphql";

/// Errors raised while validating Blink settings.
#[derive(Debug, thiserror::Error)]
pub enum BlinkConfigError {
    #[error("Invalid BLINK_API_KEY format: expected key starting with 'blink_'")]
    InvalidApiKey,

    #[error("Invalid BLINK_ENDPOINT: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Validated Blink API credentials and endpoint.
#[derive(Clone)]
pub struct BlinkConfig {
    api_key: String,
    endpoint: Url,
}

impl BlinkConfig {
    /// Validate an API key and endpoint.
    ///
    /// `endpoint` falls back to [`DEFAULT_BLINK_ENDPOINT`] when `None`.
    pub fn new(api_key: impl Into<String>, endpoint: Option<&str>) -> Result<Self, BlinkConfigError> {
        let api_key = api_key.into();
        if !api_key.starts_with(BLINK_API_KEY_PREFIX) {
            return Err(BlinkConfigError::InvalidApiKey);
        }
        let endpoint = Url::parse(endpoint.unwrap_or(DEFAULT_BLINK_ENDPOINT))?;
        Ok(Self { api_key, endpoint })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl std::fmt::Debug for BlinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlinkConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}
