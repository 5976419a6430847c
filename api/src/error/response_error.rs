//! Response payloads that break their declared schema.

use std::borrow::Cow;

use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;

use super::ValidationError;

/// How a response payload failed its contract.
#[derive(Debug, Error)]
pub enum ResponseMismatch {
    /// The payload was not valid JSON.
    #[error("malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The payload parsed but violated the response schema.
    #[error("schema violation: {0}")]
    Schema(#[source] ValidationError),

    /// The validated payload could not be decoded into the typed output.
    #[error("decode failure: {0}")]
    Decode(#[source] serde_json::Error),
}

/// The service returned a successful status with a payload that does not
/// match the declared response schema.
///
/// This is contract drift between client and service. The status and the
/// untouched payload are kept so the mismatch can be diagnosed.
#[derive(Debug, Error)]
#[error("Response for '{operation}' (HTTP {status}) failed validation: {mismatch}")]
pub struct ResponseValidationError {
    operation: String,
    status: u16,
    payload: Bytes,
    #[source]
    mismatch: ResponseMismatch,
}

impl ResponseValidationError {
    /// Creates a new response validation error.
    pub fn new(
        operation: impl Into<String>,
        status: u16,
        payload: Bytes,
        mismatch: ResponseMismatch,
    ) -> Self {
        Self {
            operation: operation.into(),
            status,
            payload,
            mismatch,
        }
    }

    /// The operation whose response failed.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The HTTP status the transport reported.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw response body, exactly as received.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// The raw body parsed as JSON, if it is JSON at all.
    pub fn payload_json(&self) -> Option<Value> {
        serde_json::from_slice(&self.payload).ok()
    }

    /// The raw body as text, replacing invalid UTF-8.
    pub fn payload_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// What went wrong.
    pub fn mismatch(&self) -> &ResponseMismatch {
        &self.mismatch
    }

    /// The schema issues, when the failure was a schema violation.
    pub fn issues(&self) -> Option<&ValidationError> {
        match &self.mismatch {
            ResponseMismatch::Schema(err) => Some(err),
            _ => None,
        }
    }
}
