//! HTTP client module.
//!
//! [`ApiClient`] is the bundled [`Transport`](crate::Transport): it joins
//! operation paths onto the configured server address, attaches the Vault
//! token and namespace headers, and records a tracing span per request.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use vault_api::ApiClient;
//! use url::Url;
//!
//! let client = ApiClient::builder(Url::parse("https://vault.internal:8200")?)
//!     .token(std::env::var("VAULT_TOKEN")?)
//!     .namespace("team-a")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//! ```

mod config;
mod executor;

pub use config::{ClientConfig, DEFAULT_ADDRESS, DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECS};
pub use executor::{ApiClient, ApiClientBuilder, NAMESPACE_HEADER, TOKEN_HEADER};
