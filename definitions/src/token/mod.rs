//! Vault token auth method.
//!
//! Every operation of the token auth method mounted at `/auth/token`,
//! declared as a [`Contract`] and collected in one [`Registry`].
//!
//! ## Operations
//!
//! | Name | Method | Path |
//! |------|--------|------|
//! | list_accessors | LIST | /auth/token/accessors |
//! | create | POST | /auth/token/create |
//! | create_orphan | POST | /auth/token/create-orphan |
//! | create_with_role | POST | /auth/token/create/{{role_name}} |
//! | lookup | POST | /auth/token/lookup |
//! | lookup_self | GET | /auth/token/lookup-self |
//! | lookup_accessor | POST | /auth/token/lookup-accessor |
//! | renew | POST | /auth/token/renew |
//! | renew_self | POST | /auth/token/renew-self |
//! | renew_accessor | POST | /auth/token/renew-accessor |
//! | revoke | POST | /auth/token/revoke |
//! | revoke_self | POST | /auth/token/revoke-self |
//! | revoke_accessor | POST | /auth/token/revoke-accessor |
//! | revoke_orphan | POST | /auth/token/revoke-orphan |
//! | list_roles | LIST | /auth/token/roles |
//! | read_role | GET | /auth/token/roles/{{role_name}} |
//! | write_role | POST | /auth/token/roles/{{role_name}} |
//! | delete_role | DELETE | /auth/token/roles/{{role_name}} |
//! | tidy | POST | /auth/token/tidy |
//!
//! ## Resources
//!
//! - [Token auth method API](https://developer.hashicorp.com/vault/api-docs/auth/token)

mod schemas;
mod types;

pub use types::*;

use std::sync::LazyLock;

use serde_json::{Value, json};
use vault_api::{
    ApiError, ConfigError, Contract, EmptyFormat, Operation, Registry, Request, RestMethod,
    Transport,
};

use schemas::*;

/// Creates every token auth method contract.
///
/// ## Examples
///
/// ```rust
/// use vault_definitions::token::define_token_contracts;
///
/// let contracts = define_token_contracts();
/// assert_eq!(contracts.len(), 19);
/// ```
pub fn define_token_contracts() -> Vec<Contract> {
    vec![
        // =====================================================================
        // Accessors
        // =====================================================================
        Contract::builder()
            .id("list_accessors")
            .method(RestMethod::List)
            .path("/auth/token/accessors")
            .response_schema(keys_envelope())
            .description("List token accessors")
            .build(),
        // =====================================================================
        // Create
        // =====================================================================
        Contract::builder()
            .id("create")
            .method(RestMethod::Post)
            .path("/auth/token/create")
            .body_schema(create_body())
            .response_schema(auth_envelope())
            .description("Create a child token")
            .build(),
        Contract::builder()
            .id("create_orphan")
            .method(RestMethod::Post)
            .path("/auth/token/create-orphan")
            .body_schema(create_body())
            .response_schema(auth_envelope())
            .description("Create a token with no parent")
            .build(),
        Contract::builder()
            .id("create_with_role")
            .method(RestMethod::Post)
            .path("/auth/token/create/{{role_name}}")
            .path_schema(role_name_params())
            .body_schema(create_body())
            .response_schema(auth_envelope())
            .description("Create a token against a role")
            .build(),
        // =====================================================================
        // Lookup
        // =====================================================================
        Contract::builder()
            .id("lookup")
            .method(RestMethod::Post)
            .path("/auth/token/lookup")
            .body_schema(token_body())
            .response_schema(lookup_envelope())
            .description("Look up a token")
            .build(),
        Contract::builder()
            .id("lookup_self")
            .method(RestMethod::Get)
            .path("/auth/token/lookup-self")
            .response_schema(lookup_envelope())
            .description("Look up the calling token")
            .build(),
        Contract::builder()
            .id("lookup_accessor")
            .method(RestMethod::Post)
            .path("/auth/token/lookup-accessor")
            .body_schema(accessor_body())
            .response_schema(lookup_envelope())
            .description("Look up a token by accessor")
            .build(),
        // =====================================================================
        // Renew
        // =====================================================================
        Contract::builder()
            .id("renew")
            .method(RestMethod::Post)
            .path("/auth/token/renew")
            .body_schema(renew_body())
            .response_schema(auth_envelope())
            .description("Renew a token")
            .build(),
        Contract::builder()
            .id("renew_self")
            .method(RestMethod::Post)
            .path("/auth/token/renew-self")
            .body_schema(renew_self_body())
            .response_schema(auth_envelope())
            .description("Renew the calling token")
            .build(),
        Contract::builder()
            .id("renew_accessor")
            .method(RestMethod::Post)
            .path("/auth/token/renew-accessor")
            .body_schema(renew_accessor_body())
            .response_schema(auth_envelope())
            .description("Renew a token by accessor")
            .build(),
        // =====================================================================
        // Revoke
        // =====================================================================
        Contract::builder()
            .id("revoke")
            .method(RestMethod::Post)
            .path("/auth/token/revoke")
            .body_schema(token_body())
            .description("Revoke a token and all its children")
            .build(),
        Contract::builder()
            .id("revoke_self")
            .method(RestMethod::Post)
            .path("/auth/token/revoke-self")
            .description("Revoke the calling token and all its children")
            .build(),
        Contract::builder()
            .id("revoke_accessor")
            .method(RestMethod::Post)
            .path("/auth/token/revoke-accessor")
            .body_schema(accessor_body())
            .description("Revoke a token by accessor")
            .build(),
        Contract::builder()
            .id("revoke_orphan")
            .method(RestMethod::Post)
            .path("/auth/token/revoke-orphan")
            .body_schema(token_body())
            .description("Revoke a token and orphan its children")
            .build(),
        // =====================================================================
        // Roles
        // =====================================================================
        Contract::builder()
            .id("list_roles")
            .method(RestMethod::List)
            .path("/auth/token/roles")
            .response_schema(keys_envelope())
            .description("List token roles")
            .build(),
        Contract::builder()
            .id("read_role")
            .method(RestMethod::Get)
            .path("/auth/token/roles/{{role_name}}")
            .path_schema(role_name_params())
            .response_schema(role_envelope())
            .description("Read a token role")
            .build(),
        Contract::builder()
            .id("write_role")
            .method(RestMethod::Post)
            .path("/auth/token/roles/{{role_name}}")
            .path_schema(role_name_params())
            .body_schema(role_body())
            .description("Create or update a token role")
            .build(),
        Contract::builder()
            .id("delete_role")
            .method(RestMethod::Delete)
            .path("/auth/token/roles/{{role_name}}")
            .path_schema(role_name_params())
            .description("Delete a token role")
            .build(),
        // =====================================================================
        // Maintenance
        // =====================================================================
        Contract::builder()
            .id("tidy")
            .method(RestMethod::Post)
            .path("/auth/token/tidy")
            .description("Clean up token storage")
            .build(),
    ]
}

/// Builds the token registry.
///
/// ## Errors
///
/// Returns a [`ConfigError`] if a contract is malformed.
pub fn define_token_registry() -> Result<Registry, ConfigError> {
    Registry::builder()
        .register_all(define_token_contracts())
        .build()
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    define_token_registry().expect("token contracts are well-formed")
});

/// The shared token registry, built on first use.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Typed access to the token auth method.
///
/// Each method runs the matching registry operation and decodes its
/// validated response.
///
/// ## Examples
///
/// ```rust,ignore
/// use vault_api::ApiClient;
/// use vault_definitions::token::{CreateTokenRequest, TokenMethod};
///
/// let token = TokenMethod::new(ApiClient::from_env()?);
/// let created = token.create(&CreateTokenRequest::default()).await?;
/// println!("{:?}", created.auth.map(|a| a.accessor));
/// ```
#[derive(Debug, Clone)]
pub struct TokenMethod<T> {
    transport: T,
}

impl<T: Transport> TokenMethod<T> {
    /// Wraps a transport, usually an [`ApiClient`](vault_api::ApiClient).
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The transport every operation is sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Generates a registry operation by name, for raw access.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownOperation`] for an unregistered name.
    pub fn operation(&self, name: &str) -> Result<Operation<'_, T>, ConfigError> {
        registry().operation(name, &self.transport)
    }

    fn role_params(role_name: &str) -> Request {
        Request::new().path_params(json!({ "role_name": role_name }))
    }

    /// Lists the accessors of every token in the auth backend.
    pub async fn list_accessors(&self) -> Result<KeyListResponse, ApiError> {
        let operation = self.operation("list_accessors")?.typed::<KeyListResponse>();
        operation.invoke(Request::new()).await
    }

    /// Creates a child token of the calling token.
    pub async fn create(&self, body: &CreateTokenRequest) -> Result<AuthResponse, ApiError> {
        let operation = self.operation("create")?.typed::<AuthResponse>();
        operation.invoke(Request::new().with_body(body)?).await
    }

    /// Creates a token with no parent.
    pub async fn create_orphan(
        &self,
        body: &CreateTokenRequest,
    ) -> Result<AuthResponse, ApiError> {
        let operation = self.operation("create_orphan")?.typed::<AuthResponse>();
        operation.invoke(Request::new().with_body(body)?).await
    }

    /// Creates a token from the settings of a named role.
    pub async fn create_with_role(
        &self,
        role_name: &str,
        body: &CreateTokenRequest,
    ) -> Result<AuthResponse, ApiError> {
        let operation = self.operation("create_with_role")?.typed::<AuthResponse>();
        let request = Self::role_params(role_name).with_body(body)?;
        operation.invoke(request).await
    }

    /// Reads the properties of a token.
    pub async fn lookup(&self, token: &str) -> Result<LookupResponse, ApiError> {
        let operation = self.operation("lookup")?.typed::<LookupResponse>();
        let body = TokenRequest {
            token: token.to_string(),
        };
        operation.invoke(Request::new().with_body(&body)?).await
    }

    /// Reads the properties of the calling token.
    pub async fn lookup_self(&self) -> Result<LookupResponse, ApiError> {
        let operation = self.operation("lookup_self")?.typed::<LookupResponse>();
        operation.invoke(Request::new()).await
    }

    /// Reads the properties of the token behind an accessor.
    pub async fn lookup_accessor(&self, accessor: &str) -> Result<LookupResponse, ApiError> {
        let operation = self.operation("lookup_accessor")?.typed::<LookupResponse>();
        let body = AccessorRequest {
            accessor: accessor.to_string(),
        };
        operation.invoke(Request::new().with_body(&body)?).await
    }

    /// Extends the lease of a token.
    pub async fn renew(&self, body: &RenewTokenRequest) -> Result<AuthResponse, ApiError> {
        let operation = self.operation("renew")?.typed::<AuthResponse>();
        operation.invoke(Request::new().with_body(body)?).await
    }

    /// Extends the lease of the calling token.
    pub async fn renew_self(&self, body: &RenewSelfRequest) -> Result<AuthResponse, ApiError> {
        let operation = self.operation("renew_self")?.typed::<AuthResponse>();
        operation.invoke(Request::new().with_body(body)?).await
    }

    /// Extends the lease of the token behind an accessor.
    pub async fn renew_accessor(
        &self,
        body: &RenewAccessorRequest,
    ) -> Result<AuthResponse, ApiError> {
        let operation = self.operation("renew_accessor")?.typed::<AuthResponse>();
        operation.invoke(Request::new().with_body(body)?).await
    }

    /// Revokes a token and every token created from it.
    pub async fn revoke(&self, token: &str) -> Result<(), ApiError> {
        let operation = self.operation("revoke")?.format::<EmptyFormat>();
        let body = TokenRequest {
            token: token.to_string(),
        };
        operation.invoke(Request::new().with_body(&body)?).await
    }

    /// Revokes the calling token and its children.
    pub async fn revoke_self(&self) -> Result<(), ApiError> {
        let operation = self.operation("revoke_self")?.format::<EmptyFormat>();
        operation.invoke(Request::new()).await
    }

    /// Revokes the token behind an accessor.
    pub async fn revoke_accessor(&self, accessor: &str) -> Result<(), ApiError> {
        let operation = self.operation("revoke_accessor")?.format::<EmptyFormat>();
        let body = AccessorRequest {
            accessor: accessor.to_string(),
        };
        operation.invoke(Request::new().with_body(&body)?).await
    }

    /// Revokes a token, leaving its children in place as orphans.
    pub async fn revoke_orphan(&self, token: &str) -> Result<(), ApiError> {
        let operation = self.operation("revoke_orphan")?.format::<EmptyFormat>();
        let body = TokenRequest {
            token: token.to_string(),
        };
        operation.invoke(Request::new().with_body(&body)?).await
    }

    /// Lists the names of every token role.
    pub async fn list_roles(&self) -> Result<KeyListResponse, ApiError> {
        let operation = self.operation("list_roles")?.typed::<KeyListResponse>();
        operation.invoke(Request::new()).await
    }

    /// Reads a token role.
    pub async fn read_role(&self, role_name: &str) -> Result<RoleResponse, ApiError> {
        let operation = self.operation("read_role")?.typed::<RoleResponse>();
        operation.invoke(Self::role_params(role_name)).await
    }

    /// Creates or replaces a token role.
    pub async fn write_role(&self, role_name: &str, role: &TokenRole) -> Result<(), ApiError> {
        let operation = self.operation("write_role")?.format::<EmptyFormat>();
        let request = Self::role_params(role_name).with_body(role)?;
        operation.invoke(request).await
    }

    /// Deletes a token role.
    pub async fn delete_role(&self, role_name: &str) -> Result<(), ApiError> {
        let operation = self.operation("delete_role")?.format::<EmptyFormat>();
        operation.invoke(Self::role_params(role_name)).await
    }

    /// Starts a background clean-up of token storage. The payload is
    /// returned as sent.
    pub async fn tidy(&self) -> Result<Option<Value>, ApiError> {
        let operation = self.operation("tidy")?;
        operation.invoke(Request::new()).await
    }
}
