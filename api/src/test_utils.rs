//! Shared test fixtures for engine tests.

use std::sync::Mutex;

use serde_json::Value;

use crate::error::TransportError;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// A transport that records every request and replays a canned answer.
pub struct StubTransport {
    reply: Box<dyn Fn() -> Result<TransportResponse, TransportError> + Send + Sync>,
    calls: Mutex<Vec<TransportRequest>>,
}

impl StubTransport {
    /// Always answers with `status` and the JSON `payload`.
    pub fn json(status: u16, payload: Value) -> Self {
        Self::with(move || Ok(TransportResponse::json(status, &payload)))
    }

    /// Always answers with `status` and an empty body.
    pub fn empty(status: u16) -> Self {
        Self::with(move || Ok(TransportResponse::new(status, bytes::Bytes::new())))
    }

    /// Always answers with `status` and the given raw body.
    pub fn raw(status: u16, body: &'static str) -> Self {
        Self::with(move || Ok(TransportResponse::new(status, body)))
    }

    /// Answers with whatever `reply` produces.
    pub fn with(
        reply: impl Fn() -> Result<TransportResponse, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The last request received.
    pub fn last_request(&self) -> Option<TransportRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(request);
        (self.reply)()
    }
}
