//! Response format trait and implementations.
//!
//! The [`ResponseFormat`] trait defines how a validated payload becomes the
//! typed output of an [`Operation`](crate::Operation). Schema validation has
//! already happened by the time a format sees the payload. Operations without
//! a response schema may hand over a body that is not JSON; formats receive
//! the raw bytes alongside the payload for that case.

use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for response decoding strategies.
///
/// ## Examples
///
/// ```rust,ignore
/// use vault_api::response::{JsonFormat, ResponseFormat};
///
/// // The format type encodes the output type
/// type CreateTokenFormat = JsonFormat<TokenResponse>;
/// ```
pub trait ResponseFormat: Send + Sync {
    /// The output type after decoding.
    type Output: Send;

    /// Decodes a validated payload.
    ///
    /// `payload` is `None` when the service sent no body, or when the body
    /// was not JSON and the operation has no response schema. `raw` is always
    /// the body exactly as received.
    fn decode(payload: Option<Value>, raw: &Bytes) -> Result<Self::Output, serde_json::Error>;
}

/// The JSON payload, or a non-JSON body as a JSON string.
fn payload_or_text(payload: Option<Value>, raw: &Bytes) -> Option<Value> {
    if payload.is_some() || raw.iter().all(u8::is_ascii_whitespace) {
        return payload;
    }
    Some(Value::String(String::from_utf8_lossy(raw).into_owned()))
}

/// The validated (or, without a response schema, raw) payload. A body that
/// is not JSON is returned as a JSON string.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFormat;

impl ResponseFormat for RawFormat {
    type Output = Option<Value>;

    fn decode(payload: Option<Value>, raw: &Bytes) -> Result<Self::Output, serde_json::Error> {
        Ok(payload_or_text(payload, raw))
    }
}

/// Typed deserialization of the payload.
///
/// ## Type Parameters
///
/// - `T`: The type to deserialize into. An absent payload is presented to
///   `T` as `null`, so `Option<T>` outputs accept empty responses. A body
///   that is not JSON is presented as a string.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned + Send> ResponseFormat for JsonFormat<T> {
    type Output = T;

    fn decode(payload: Option<Value>, raw: &Bytes) -> Result<Self::Output, serde_json::Error> {
        serde_json::from_value(payload_or_text(payload, raw).unwrap_or(Value::Null))
    }
}

/// Discards the payload. For operations that return nothing useful.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFormat;

impl ResponseFormat for EmptyFormat {
    type Output = ();

    fn decode(_payload: Option<Value>, _raw: &Bytes) -> Result<Self::Output, serde_json::Error> {
        Ok(())
    }
}
