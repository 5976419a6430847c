//! Convenient re-exports for working with the Vault definitions.
//!
//! ## Examples
//!
//! ```
//! use vault_definitions::prelude::*;
//!
//! let registry = define_token_registry().unwrap();
//! assert!(registry.get("create_orphan").is_some());
//! ```

// Registries and typed accessors
pub use crate::token::{TokenMethod, define_token_contracts, define_token_registry};

// Request and response types for each API
pub use crate::token::{
    AccessorRequest, AuthResponse, CreateTokenRequest, KeyList, KeyListResponse, LookupResponse,
    RenewAccessorRequest, RenewSelfRequest, RenewTokenRequest, RoleResponse, TokenAuth,
    TokenLookup, TokenRequest, TokenRole, TokenRoleInfo,
};
