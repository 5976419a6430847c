//! Layered error types for the engine.
//!
//! The error hierarchy keeps every failure kind distinguishable:
//! - [`ApiError`] - Top-level error returned by an invocation
//! - [`ValidationError`] - Caller input (path or body) failed its schema
//! - [`ConfigError`] - Contract authoring defects and client configuration
//! - [`TransportError`] - Network failures reported by the transport
//! - [`ServiceError`] - The service answered with a non-success status
//! - [`ResponseValidationError`] - The service's payload broke its schema

mod api_error;
mod config_error;
mod response_error;
mod service_error;
mod transport_error;
mod validation_error;

pub use api_error::ApiError;
pub use config_error::ConfigError;
pub use response_error::{ResponseMismatch, ResponseValidationError};
pub use service_error::ServiceError;
pub use transport_error::TransportError;
pub use validation_error::{FieldPath, Issue, IssueKind, PathSegment, ValidationError};
