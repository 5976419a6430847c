//! Non-success answers from the service.

use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;

/// The service answered, but with a non-success HTTP status.
///
/// Vault reports failures as `{"errors": ["..."]}`; those messages are
/// extracted when present. The raw payload is kept for diagnosis.
#[derive(Debug, Clone, Error)]
#[error("HTTP {status}: {}", self.summary())]
pub struct ServiceError {
    status: u16,
    errors: Vec<String>,
    payload: Bytes,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<String>,
}

impl ServiceError {
    /// Builds the error from a status and raw response body.
    pub fn from_response(status: u16, payload: Bytes) -> Self {
        let errors = serde_json::from_slice::<ErrorEnvelope>(&payload)
            .map(|envelope| envelope.errors)
            .unwrap_or_default();
        Self {
            status,
            errors,
            payload,
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Error messages reported by the service, if any.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The raw response body.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Returns `true` for 5xx and 429 answers.
    pub fn is_retryable(&self) -> bool {
        self.status >= 500 || self.status == 429
    }

    /// Returns `true` for 403, which Vault uses for "permission denied".
    pub fn is_permission_denied(&self) -> bool {
        self.status == 403
    }

    /// Returns `true` for 404.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    fn summary(&self) -> String {
        if self.errors.is_empty() {
            String::from_utf8_lossy(&self.payload).into_owned()
        } else {
            self.errors.join("; ")
        }
    }
}
