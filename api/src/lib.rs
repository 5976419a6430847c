//! Schema-driven command engine for the HashiCorp Vault HTTP API.
//!
//! The `vault-api` crate turns declarative operation contracts into
//! callable, validated operations.
//!
//! ## Features
//!
//! - **Contracts**: method, `{{name}}` path template and optional path,
//!   body and response schemas per operation
//! - **Validation on both sides**: inputs are checked before anything is
//!   sent, responses are checked before anything is returned
//! - **`LIST` support**: Vault's extension verb uses the same dispatch path
//! - **Async-first HTTP client**: Built on `reqwest` with `tokio`
//! - **Layered error handling**: every failure kind is its own variant
//!
//! ## Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use vault_api::schema::Validator;
//! use vault_api::{generate, ApiClient, Contract, Request, RestMethod};
//!
//! let read_role = Contract::builder()
//!     .id("read_role")
//!     .method(RestMethod::Get)
//!     .path("/auth/token/roles/{{role_name}}")
//!     .path_schema(Validator::object([("role_name", Validator::string())]))
//!     .build();
//!
//! let client = ApiClient::from_env()?;
//! let operation = generate(&read_role, &client)?;
//! let role = operation
//!     .invoke(Request::new().path_params(json!({ "role_name": "ops" })))
//!     .await?;
//! ```

pub mod client;
pub mod contract;
pub mod error;
pub mod method;
pub mod operation;
pub mod operation_id;
pub mod registry;
pub mod response;
pub mod schema;
pub mod template;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_utils;

pub use client::{ApiClient, ApiClientBuilder, ClientConfig};
pub use contract::{Contract, ContractBuilder};
pub use error::{
    ApiError, ConfigError, ResponseValidationError, ServiceError, TransportError,
    ValidationError,
};
pub use method::RestMethod;
pub use operation::{generate, Operation, Request};
pub use operation_id::{OperationId, OperationIdError};
pub use registry::{Registry, RegistryBuilder};
pub use response::{EmptyFormat, JsonFormat, RawFormat, ResponseFormat};
pub use template::PathTemplate;
pub use transport::{Transport, TransportRequest, TransportResponse};
