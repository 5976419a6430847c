//! Top-level error type for invocations.

use super::{ConfigError, ResponseValidationError, ServiceError, TransportError, ValidationError};
use thiserror::Error;

/// Top-level error returned by an operation invocation.
///
/// Each variant is a distinct failure kind so callers can tell "my input
/// was malformed" from "the service is unreachable" from "the service
/// returned something it shouldn't have".
///
/// ## Examples
///
/// ```rust,ignore
/// use vault_api::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::PathValidation(e) => eprintln!("Bad path params: {e}"),
///         ApiError::BodyValidation(e) => eprintln!("Bad body: {e}"),
///         ApiError::Config(e) => panic!("Broken contract: {e}"),
///         ApiError::Transport(e) => eprintln!("Unreachable: {e}"),
///         ApiError::Service(e) => eprintln!("Vault said no: {e}"),
///         ApiError::ResponseValidation(e) => eprintln!("Contract drift: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller path parameters failed the path schema.
    #[error("Invalid path parameters: {0}")]
    PathValidation(#[source] ValidationError),

    /// Caller body failed the body schema.
    #[error("Invalid request body: {0}")]
    BodyValidation(#[source] ValidationError),

    /// Contract authoring defect or client misconfiguration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Network failure reported by the transport.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a non-success status.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The service's payload broke the response schema.
    #[error(transparent)]
    ResponseValidation(#[from] ResponseValidationError),
}

impl ApiError {
    /// Returns `true` if the failure came from caller input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::PathValidation(_) | Self::BodyValidation(_))
    }

    /// Returns `true` if retrying the same call could succeed.
    ///
    /// Only transport failures and retryable service statuses qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_retryable(),
            Self::Service(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// The validation issues, for either input validation failure.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::PathValidation(e) | Self::BodyValidation(e) => Some(e),
            _ => None,
        }
    }
}
