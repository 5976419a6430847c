//! Token auth method request and response types.
//!
//! Request types skip unset fields when serialized, so the declared
//! defaults apply to whatever the caller leaves out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Request Types
// =============================================================================

/// Parameters for `create`, `create_orphan` and `create_with_role`.
///
/// ## Example
///
/// ```json
/// {
///   "policies": ["web", "stage"],
///   "meta": { "user": "armon" },
///   "ttl": "1h",
///   "renewable": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTokenRequest {
    /// Explicit token ID. Root only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Role to create the token against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub policies: Option<Vec<String>>,

    /// Metadata echoed in audit logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_parent: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_default_policy: Option<bool>,

    /// Defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewable: Option<bool>,

    /// Deprecated alias of `ttl`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,

    /// `service` or `batch`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_max_ttl: Option<String>,

    /// Defaults to `"token"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_uses: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_alias: Option<String>,
}

/// A body naming a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

/// A body naming a token accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorRequest {
    pub accessor: String,
}

/// Parameters for `renew`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewTokenRequest {
    pub token: String,

    /// Requested lease extension, e.g. `"1h"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increment: Option<String>,
}

/// Parameters for `renew_self`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewSelfRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increment: Option<String>,
}

/// Parameters for `renew_accessor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewAccessorRequest {
    pub accessor: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub increment: Option<String>,
}

/// A token role, as written to `/auth/token/roles/{role_name}`.
///
/// ## Example
///
/// ```json
/// {
///   "allowed_policies": ["dev"],
///   "orphan": false,
///   "token_period": "24h",
///   "token_type": "service"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRole {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_policies: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallowed_policies: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_policies_glob: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallowed_policies_glob: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphan: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_suffix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_entity_aliases: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_bound_cidrs: Option<Vec<String>>,

    /// Duration string on write, whole seconds on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_explicit_max_ttl: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_no_default_policy: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_num_uses: Option<u64>,

    /// Duration string on write, whole seconds on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_period: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

// =============================================================================
// Response Types
// =============================================================================

/// The envelope returned by create and renew operations.
///
/// ## Example
///
/// ```json
/// {
///   "request_id": "f00341c1-fad5-f6e6-13fd-235617f858a1",
///   "lease_id": "",
///   "renewable": false,
///   "lease_duration": 0,
///   "data": null,
///   "wrap_info": null,
///   "warnings": null,
///   "auth": {
///     "client_token": "s.wOrq9dO9kzOcuvB06CMviJhZ",
///     "accessor": "B6oixijqmeR4bsLOJH88Ska9",
///     "policies": ["default", "web"],
///     "token_policies": ["default", "web"],
///     "metadata": { "user": "armon" },
///     "lease_duration": 3600,
///     "renewable": true,
///     "entity_id": "",
///     "token_type": "service",
///     "orphan": false,
///     "num_uses": 0
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub request_id: String,
    pub lease_id: Option<String>,
    pub renewable: bool,
    pub lease_duration: u64,
    pub data: Option<Value>,
    pub wrap_info: Option<Value>,
    pub warnings: Option<Vec<String>>,
    pub auth: Option<TokenAuth>,
}

/// The `auth` block of an [`AuthResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAuth {
    pub client_token: String,
    pub accessor: String,
    pub policies: Vec<String>,
    pub token_policies: Vec<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub lease_duration: u64,
    pub renewable: bool,
    pub entity_id: String,
    pub token_type: String,
    pub orphan: bool,
    pub num_uses: u64,
}

/// The envelope returned by the lookup operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub data: TokenLookup,
}

/// Properties of a looked-up token.
///
/// `expire_time` is `None` for tokens that never expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLookup {
    pub accessor: String,
    pub creation_time: u64,
    pub creation_ttl: u64,
    pub display_name: String,
    pub entity_id: String,
    pub expire_time: Option<String>,
    pub explicit_max_ttl: u64,
    pub id: String,
    pub identity_policies: Option<Vec<String>>,
    pub issue_time: Option<String>,
    pub meta: Option<BTreeMap<String, String>>,
    pub num_uses: u64,
    pub orphan: bool,
    pub path: String,
    pub policies: Vec<String>,
    pub renewable: Option<bool>,
    pub ttl: u64,
    #[serde(rename = "type")]
    pub token_type: Option<String>,
}

/// The envelope returned by `LIST` operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyListResponse {
    pub data: KeyList,
    pub lease_id: String,
    pub lease_duration: u64,
    pub renewable: bool,
    pub auth: Option<Value>,
    pub warnings: Option<Value>,
    pub wrap_info: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyList {
    pub keys: Vec<String>,
}

/// The envelope returned when reading a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleResponse {
    pub data: TokenRoleInfo,
}

/// A stored token role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRoleInfo {
    pub name: String,
    #[serde(flatten)]
    pub role: TokenRole,
}
