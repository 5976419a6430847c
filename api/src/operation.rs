//! The command generator.
//!
//! [`generate`] binds a [`Contract`] to a [`Transport`] and returns an
//! [`Operation`]. Each [`Operation::invoke`] runs the same pipeline:
//!
//! 1. validate path parameters and substitute them into the URL template,
//! 2. validate the body, applying declared defaults,
//! 3. dispatch through the transport,
//! 4. validate the response payload and decode it.
//!
//! Inputs are validated before any network activity and outputs after it;
//! a failure at any step ends the invocation.

use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn, Span};

use crate::contract::Contract;
use crate::error::{
    ApiError, ConfigError, FieldPath, Issue, IssueKind, ResponseMismatch,
    ResponseValidationError, ServiceError, ValidationError,
};
use crate::response::{JsonFormat, RawFormat, ResponseFormat};
use crate::template::PathTemplate;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// The caller's input for one invocation.
///
/// ## Examples
///
/// ```rust
/// use serde_json::json;
/// use vault_api::Request;
///
/// let request = Request::new()
///     .path_params(json!({ "role_name": "ops" }))
///     .body(json!({ "ttl": "1h" }));
/// assert!(request.body_value().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    path_params: Option<Value>,
    body: Option<Value>,
}

impl Request {
    /// An empty request: no path parameters, no body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path parameters.
    pub fn path_params(mut self, params: Value) -> Self {
        self.path_params = Some(params);
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the path parameters from any serializable value.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::PathValidation`] if the value cannot be
    /// represented as JSON.
    pub fn with_path_params<P: Serialize>(self, params: &P) -> Result<Self, ApiError> {
        let value = to_json(params).map_err(ApiError::PathValidation)?;
        Ok(self.path_params(value))
    }

    /// Sets the body from any serializable value.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::BodyValidation`] if the value cannot be
    /// represented as JSON.
    pub fn with_body<B: Serialize>(self, body: &B) -> Result<Self, ApiError> {
        let value = to_json(body).map_err(ApiError::BodyValidation)?;
        Ok(self.body(value))
    }

    /// Returns the path parameters, if set.
    pub fn path_params_value(&self) -> Option<&Value> {
        self.path_params.as_ref()
    }

    /// Returns the body, if set.
    pub fn body_value(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

fn to_json<S: Serialize>(value: &S) -> Result<Value, ValidationError> {
    serde_json::to_value(value).map_err(|e| {
        ValidationError::new(vec![Issue::new(
            FieldPath::root(),
            IssueKind::Unrepresentable(e.to_string()),
        )])
    })
}

/// Binds a contract to a transport.
///
/// The contract is checked eagerly: its path template must parse, and its
/// placeholders must match the keys of its path schema exactly. A contract
/// without a path schema must have a static template.
///
/// ## Errors
///
/// Returns a [`ConfigError`] describing the authoring defect.
///
/// ## Examples
///
/// ```rust,ignore
/// let operation = vault_api::generate(&contract, &client)?;
/// let payload = operation.invoke(Request::new().body(json!({}))).await?;
/// ```
pub fn generate<'a, T: Transport>(
    contract: &'a Contract,
    transport: &'a T,
) -> Result<Operation<'a, T>, ConfigError> {
    let template = check_contract(contract)?;
    Ok(Operation {
        contract,
        template,
        transport,
        _format: PhantomData,
    })
}

/// Runs the generation-time checks for a contract.
pub(crate) fn check_contract(contract: &Contract) -> Result<PathTemplate, ConfigError> {
    let template = PathTemplate::parse(contract.path())?;

    let keys: Vec<&str> = match contract.path_schema() {
        None => Vec::new(),
        Some(schema) => schema
            .as_object()
            .ok_or_else(|| ConfigError::PathSchemaNotObject {
                operation: contract.id().to_string(),
            })?
            .keys()
            .collect(),
    };
    let placeholders: Vec<&str> = template.placeholders().collect();

    let unmatched_placeholders: Vec<String> = placeholders
        .iter()
        .filter(|p| !keys.contains(p))
        .map(|p| p.to_string())
        .collect();
    let unmatched_keys: Vec<String> = keys
        .iter()
        .filter(|k| !placeholders.contains(k))
        .map(|k| k.to_string())
        .collect();

    if unmatched_placeholders.is_empty() && unmatched_keys.is_empty() {
        Ok(template)
    } else {
        Err(ConfigError::PlaceholderMismatch {
            operation: contract.id().to_string(),
            unmatched_placeholders,
            unmatched_keys,
        })
    }
}

/// A contract bound to a transport, ready to invoke.
///
/// ## Type Parameters
///
/// - `T`: The transport.
/// - `F`: The [`ResponseFormat`] producing the output; [`RawFormat`] until
///   [`typed`](Self::typed) or [`format`](Self::format) picks another.
pub struct Operation<'a, T, F = RawFormat> {
    contract: &'a Contract,
    template: PathTemplate,
    transport: &'a T,
    _format: PhantomData<fn() -> F>,
}

impl<T, F> std::fmt::Debug for Operation<'_, T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("contract", &self.contract.id())
            .field("template", &self.template.as_str())
            .finish_non_exhaustive()
    }
}

impl<'a, T: Transport, F: ResponseFormat> Operation<'a, T, F> {
    /// The contract this operation runs.
    pub fn contract(&self) -> &'a Contract {
        self.contract
    }

    /// Decodes successful payloads into `R`.
    pub fn typed<R: DeserializeOwned + Send>(self) -> Operation<'a, T, JsonFormat<R>> {
        self.format()
    }

    /// Decodes successful payloads with another format.
    pub fn format<G: ResponseFormat>(self) -> Operation<'a, T, G> {
        Operation {
            contract: self.contract,
            template: self.template,
            transport: self.transport,
            _format: PhantomData,
        }
    }

    /// Runs the input half of the pipeline without sending anything.
    ///
    /// Returns the exact request the transport would receive.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::PathValidation`], [`ApiError::BodyValidation`] or
    /// [`ApiError::Config`].
    pub fn prepare(&self, request: &Request) -> Result<TransportRequest, ApiError> {
        let path = self.resolve_path(request.path_params.as_ref())?;
        let body = self.validate_body(request.body.as_ref())?;
        Ok(TransportRequest {
            method: self.contract.method(),
            path,
            body,
        })
    }

    /// Invokes the operation once.
    ///
    /// ## Errors
    ///
    /// Every failure kind is a distinct [`ApiError`] variant. Nothing is
    /// sent when input validation fails.
    #[instrument(
        name = "vault_operation",
        skip(self, request),
        fields(
            operation = %self.contract.id(),
            http.method = %self.contract.method(),
            http.path = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn invoke(&self, request: Request) -> Result<F::Output, ApiError> {
        let outbound = self.prepare(&request).inspect_err(|e| {
            debug!(error = %e, "Rejected invocation before dispatch");
        })?;
        Span::current().record("http.path", outbound.path.as_str());

        let response = self.transport.send(outbound).await.inspect_err(|e| {
            Span::current().record("otel.status_code", "ERROR");
            warn!(error = %e, "Transport failed");
        })?;
        Span::current().record("http.status_code", response.status);

        self.decode_response(response)
    }

    fn resolve_path(&self, params: Option<&Value>) -> Result<String, ApiError> {
        let Some(schema) = self.contract.path_schema() else {
            return Ok(self.template.render(self.contract.id(), &Map::new())?);
        };

        let validated = schema
            .validate_input(params)
            .map_err(ApiError::PathValidation)?;
        let params = match validated {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };

        let dot_segments = self.template.dot_segments(&params);
        if !dot_segments.is_empty() {
            debug!("Rejecting dot segment path parameter");
            return Err(ApiError::PathValidation(ValidationError::new(dot_segments)));
        }
        Ok(self.template.render(self.contract.id(), &params)?)
    }

    fn validate_body(&self, body: Option<&Value>) -> Result<Option<Value>, ApiError> {
        let Some(schema) = self.contract.body_schema() else {
            if body.is_some() {
                debug!("Ignoring body for operation without a body schema");
            }
            return Ok(None);
        };
        schema.validate_input(body).map_err(ApiError::BodyValidation)
    }

    fn decode_response(&self, response: TransportResponse) -> Result<F::Output, ApiError> {
        let TransportResponse { status, body } = response;
        let operation = self.contract.id();

        if !(200..300).contains(&status) {
            let otel_status = if status >= 500 { "ERROR" } else { "UNSET" };
            Span::current().record("otel.status_code", otel_status);
            return Err(ServiceError::from_response(status, body).into());
        }

        let Some(schema) = self.contract.response_schema() else {
            let payload = serde_json::from_slice::<Value>(&body).ok();
            if payload.is_none() && !body.iter().all(u8::is_ascii_whitespace) {
                debug!("Passing through non-JSON payload without a response schema");
            }
            return self.finish(status, payload, body);
        };

        let payload = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            match serde_json::from_slice::<Value>(&body) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(error = %e, "Response payload is not JSON");
                    Span::current().record("otel.status_code", "ERROR");
                    return Err(ResponseValidationError::new(
                        operation,
                        status,
                        body,
                        ResponseMismatch::Malformed(e),
                    )
                    .into());
                }
            }
        };

        let payload = match schema.validate_input(payload.as_ref()) {
            Ok(validated) => validated,
            Err(e) => {
                warn!(error = %e, "Response payload violates its schema");
                Span::current().record("otel.status_code", "ERROR");
                return Err(ResponseValidationError::new(
                    operation,
                    status,
                    body,
                    ResponseMismatch::Schema(e),
                )
                .into());
            }
        };
        self.finish(status, payload, body)
    }

    fn finish(
        &self,
        status: u16,
        payload: Option<Value>,
        body: Bytes,
    ) -> Result<F::Output, ApiError> {
        let output = F::decode(payload, &body).map_err(|e| {
            warn!(error = %e, "Response payload does not decode into the output type");
            Span::current().record("otel.status_code", "ERROR");
            let operation = self.contract.id();
            ResponseValidationError::new(operation, status, body, ResponseMismatch::Decode(e))
        })?;

        Span::current().record("otel.status_code", "OK");
        Ok(output)
    }
}
