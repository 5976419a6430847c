//! Vault API Definitions
//!
//! This crate contains Vault HTTP API operations declared with the
//! contracts from `vault-api`. Each auth method or secrets engine is
//! organized in its own module.
//!
//! ## Available APIs
//!
//! - [`token`] - Token auth method
//!
//! ## Examples
//!
//! ```
//! use vault_definitions::token;
//!
//! let registry = token::registry();
//! assert_eq!(registry.len(), 19);
//! assert!(registry.get("lookup_self").is_some());
//! ```

pub mod prelude;
pub mod token;

pub use token::{TokenMethod, define_token_registry};
