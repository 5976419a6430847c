//! Network failures reported by the transport.

use thiserror::Error;

/// Errors from the transport layer.
///
/// These represent failures to complete the HTTP exchange at all. A
/// response with a non-success status is not a transport error; see
/// [`ServiceError`](super::ServiceError).
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        duration_ms: u64,
    },

    /// Failed to establish connection to the server.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The HTTP layer rejected the request method.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The request path could not be joined onto the service address.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Returns `true` if retrying the same request could succeed.
    ///
    /// Timeouts and connection failures are retryable. Whether to actually
    /// retry is the caller's decision; the engine never does.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection(_) => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::InvalidMethod(_) | Self::InvalidUrl(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_retryable() {
        let err = TransportError::Timeout { duration_ms: 5000 };
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Request timeout after 5000ms");
    }

    #[test]
    fn test_connection_is_retryable() {
        let err = TransportError::Connection("connection refused".to_string());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_invalid_method_not_retryable() {
        let err = TransportError::InvalidMethod("LI ST".to_string());
        assert!(!err.is_retryable());
    }
}
