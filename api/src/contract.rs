//! Schema contract definition with type-state builder pattern.
//!
//! The [`Contract`] struct is the inert declaration of one remote
//! operation: its method, its URL template and up to three validators. The
//! [`ContractBuilder`] uses a type-state pattern to ensure the id, method
//! and path are set at compile time.

use std::marker::PhantomData;

use crate::method::RestMethod;
use crate::schema::Validator;

/// Marker types for builder state tracking.
pub mod builder_state {
    /// Marker for a field that has not been set.
    pub struct Missing;
    /// Marker for a field that has been set.
    pub struct Present;
}

use builder_state::{Missing, Present};

/// Declaration of one remote operation.
///
/// Contracts are immutable once built and are only read by the engine, so
/// a single contract can back any number of concurrent invocations.
/// Consistency between the path template and the path schema is not
/// checked here; [`generate`](crate::generate) asserts it.
///
/// ## Examples
///
/// ```rust
/// use vault_api::{Contract, RestMethod};
/// use vault_api::schema::Validator;
///
/// let revoke = Contract::builder()
///     .id("revoke_orphan")
///     .method(RestMethod::Post)
///     .path("/auth/token/revoke-orphan")
///     .body_schema(Validator::object([("token", Validator::string())]))
///     .description("Revoke a token but not its children")
///     .build();
///
/// assert_eq!(revoke.method(), RestMethod::Post);
/// assert!(revoke.response_schema().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Contract {
    id: String,
    method: RestMethod,
    /// URL path template (may contain `{{name}}` placeholders).
    path: String,
    path_schema: Option<Validator>,
    body_schema: Option<Validator>,
    response_schema: Option<Validator>,
    description: Option<String>,
}

impl Contract {
    /// Creates a new contract builder.
    pub fn builder() -> ContractBuilder<Missing, Missing, Missing> {
        ContractBuilder::new()
    }

    /// Returns the operation's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Returns the URL path template.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path-parameter validator, if declared.
    pub fn path_schema(&self) -> Option<&Validator> {
        self.path_schema.as_ref()
    }

    /// Returns the request-body validator, if declared.
    pub fn body_schema(&self) -> Option<&Validator> {
        self.body_schema.as_ref()
    }

    /// Returns the response-body validator, if declared.
    pub fn response_schema(&self) -> Option<&Validator> {
        self.response_schema.as_ref()
    }

    /// Returns the optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns `true` if invocations must supply a body.
    pub fn requires_body(&self) -> bool {
        self.body_schema
            .as_ref()
            .is_some_and(|schema| !schema.accepts_absent())
    }
}

/// Type-state builder for [`Contract`].
///
/// ## Type Parameters
///
/// - `Id`: State of the ID field (`Missing` or `Present`).
/// - `Method`: State of the method field (`Missing` or `Present`).
/// - `Path`: State of the path field (`Missing` or `Present`).
pub struct ContractBuilder<Id, Method, Path> {
    id: Option<String>,
    method: Option<RestMethod>,
    path: Option<String>,
    path_schema: Option<Validator>,
    body_schema: Option<Validator>,
    response_schema: Option<Validator>,
    description: Option<String>,
    _phantom: PhantomData<(Id, Method, Path)>,
}

impl ContractBuilder<Missing, Missing, Missing> {
    /// Creates a new builder with no fields set.
    pub fn new() -> Self {
        Self {
            id: None,
            method: None,
            path: None,
            path_schema: None,
            body_schema: None,
            response_schema: None,
            description: None,
            _phantom: PhantomData,
        }
    }
}

impl Default for ContractBuilder<Missing, Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, M, P> ContractBuilder<I, M, P> {
    fn transition<I2, M2, P2>(self) -> ContractBuilder<I2, M2, P2> {
        ContractBuilder {
            id: self.id,
            method: self.method,
            path: self.path,
            path_schema: self.path_schema,
            body_schema: self.body_schema,
            response_schema: self.response_schema,
            description: self.description,
            _phantom: PhantomData,
        }
    }

    /// Declares the path-parameter validator.
    pub fn path_schema(mut self, schema: Validator) -> Self {
        self.path_schema = Some(schema);
        self
    }

    /// Declares the request-body validator.
    pub fn body_schema(mut self, schema: Validator) -> Self {
        self.body_schema = Some(schema);
        self
    }

    /// Declares the response-body validator.
    pub fn response_schema(mut self, schema: Validator) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Sets an optional description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl<M, P> ContractBuilder<Missing, M, P> {
    /// Sets the operation ID.
    pub fn id(mut self, id: impl Into<String>) -> ContractBuilder<Present, M, P> {
        self.id = Some(id.into());
        self.transition()
    }
}

impl<I, P> ContractBuilder<I, Missing, P> {
    /// Sets the HTTP method.
    pub fn method(mut self, method: RestMethod) -> ContractBuilder<I, Present, P> {
        self.method = Some(method);
        self.transition()
    }
}

impl<I, M> ContractBuilder<I, M, Missing> {
    /// Sets the URL path template.
    ///
    /// The template may contain `{{name}}` placeholders.
    pub fn path(mut self, path: impl Into<String>) -> ContractBuilder<I, M, Present> {
        self.path = Some(path.into());
        self.transition()
    }
}

impl ContractBuilder<Present, Present, Present> {
    /// Builds the contract.
    ///
    /// Only available once id, method and path have been set.
    pub fn build(self) -> Contract {
        Contract {
            id: self.id.expect("id set via type state"),
            method: self.method.expect("method set via type state"),
            path: self.path.expect("path set via type state"),
            path_schema: self.path_schema,
            body_schema: self.body_schema,
            response_schema: self.response_schema,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let contract = Contract::builder()
            .id("lookup_self")
            .method(RestMethod::Get)
            .path("/auth/token/lookup-self")
            .build();

        assert_eq!(contract.id(), "lookup_self");
        assert_eq!(contract.method(), RestMethod::Get);
        assert_eq!(contract.path(), "/auth/token/lookup-self");
        assert!(contract.path_schema().is_none());
        assert!(contract.body_schema().is_none());
        assert!(contract.response_schema().is_none());
        assert_eq!(contract.description(), None);
    }

    #[test]
    fn test_builder_order_independence() {
        let contract = Contract::builder()
            .body_schema(Validator::object([("token", Validator::string())]))
            .path("/auth/token/lookup")
            .description("Lookup a token")
            .method(RestMethod::Post)
            .id("lookup")
            .build();

        assert_eq!(contract.id(), "lookup");
        assert_eq!(contract.description(), Some("Lookup a token"));
        assert!(contract.body_schema().is_some());
    }

    #[test]
    fn test_requires_body() {
        let required = Contract::builder()
            .id("lookup_accessor")
            .method(RestMethod::Post)
            .path("/auth/token/lookup-accessor")
            .body_schema(Validator::object([("accessor", Validator::string())]))
            .build();
        assert!(required.requires_body());

        let optional = Contract::builder()
            .id("renew_self")
            .method(RestMethod::Post)
            .path("/auth/token/renew-self")
            .body_schema(Validator::object([("increment", Validator::string().optional())]).optional())
            .build();
        assert!(!optional.requires_body());

        let none = Contract::builder()
            .id("revoke_self")
            .method(RestMethod::Post)
            .path("/auth/token/revoke-self")
            .build();
        assert!(!none.requires_body());
    }

    #[test]
    fn test_clone() {
        let contract = Contract::builder()
            .id("list_roles")
            .method(RestMethod::List)
            .path("/auth/token/roles")
            .build();

        let cloned = contract.clone();
        assert_eq!(cloned.id(), contract.id());
        assert_eq!(cloned.method(), RestMethod::List);
    }
}
