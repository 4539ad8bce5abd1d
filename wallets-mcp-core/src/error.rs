//! Operation error taxonomy.

use wallets_mcp_sdk::client::{ClientError, GraphqlError, join_messages};

/// What went wrong in an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Blink could not be reached or answered with a non-2xx status.
    Transport,
    /// The GraphQL envelope carried top-level errors.
    Api,
    /// The response did not have the expected shape.
    Format,
    /// A mutation payload carried its own error list.
    Business,
    /// A mutation succeeded without errors but returned no result object.
    MissingResult,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Api => write!(f, "api"),
            ErrorKind::Format => write!(f, "format"),
            ErrorKind::Business => write!(f, "business"),
            ErrorKind::MissingResult => write!(f, "missing_result"),
        }
    }
}

impl From<&ClientError> for ErrorKind {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Http(_) | ClientError::Status { .. } => ErrorKind::Transport,
            ClientError::Api(_) => ErrorKind::Api,
            ClientError::Format(_) | ClientError::Json(_) => ErrorKind::Format,
        }
    }
}

/// A failed catalog operation.
///
/// Transport and adapter failures are wrapped exactly once with a stable
/// message naming the operation ("Failed to get account from Blink"); the
/// underlying [`ClientError`] stays reachable through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct OperationError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<ClientError>,
}

impl OperationError {
    /// Wrap a transport/adapter failure under `message`.
    pub(crate) fn wrap(message: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| Self {
            kind: ErrorKind::from(&source),
            message: message.to_owned(),
            source: Some(source),
        }
    }

    /// A mutation reported business errors, e.g. "Payment failed: insufficient balance".
    pub(crate) fn business(prefix: &str, errors: &[GraphqlError]) -> Self {
        Self {
            kind: ErrorKind::Business,
            message: format!("{prefix}: {}", join_messages(errors)),
            source: None,
        }
    }

    pub(crate) fn missing_result(message: &'static str) -> Self {
        Self {
            kind: ErrorKind::MissingResult,
            message: message.to_owned(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The transport/adapter failure this error wraps, if any.
    pub fn client_error(&self) -> Option<&ClientError> {
        self.source.as_ref()
    }
}

/// Fail with a business error if a mutation payload carries errors.
pub(crate) fn check_business_errors(
    prefix: &str,
    errors: &[GraphqlError],
) -> Result<(), OperationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(OperationError::business(prefix, errors))
    }
}
