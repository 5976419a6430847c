//! The boundary between the engine and the network.
//!
//! The engine hands a [`Transport`] a verb, a path and an optional JSON
//! payload, and gets back a status and raw body, or a [`TransportError`].
//! Connection reuse, TLS, authentication headers, timeouts and
//! cancellation are the transport's business. [`ApiClient`](crate::ApiClient)
//! is the bundled `reqwest` implementation.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;

use crate::error::TransportError;
use crate::method::RestMethod;

/// One outbound request, fully validated and resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method, possibly the non-standard `LIST`.
    pub method: RestMethod,
    /// Path with every placeholder substituted and encoded.
    pub path: String,
    /// Validated JSON payload, when the operation declares a body.
    pub body: Option<Value>,
}

/// The raw answer to a [`TransportRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body; empty when the service sent none.
    pub body: Bytes,
}

impl TransportResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a response with a JSON body.
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends resolved requests to the service.
///
/// Implementations must be shareable across tasks; the engine may hold a
/// reference to one transport from many concurrent invocations.
pub trait Transport: Send + Sync {
    /// Performs one HTTP exchange.
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        self.as_ref().send(request)
    }
}
