//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] struct, the `reqwest`-backed
//! [`Transport`] that carries resolved requests to a Vault server.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, instrument, warn, Span};
use url::Url;

use super::config::ClientConfig;
use crate::error::{ApiError, ConfigError, TransportError};
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// Header carrying the client token.
pub const TOKEN_HEADER: &str = "x-vault-token";

/// Header selecting the Vault Enterprise namespace.
pub const NAMESPACE_HEADER: &str = "x-vault-namespace";

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    config: ClientConfig,
    default_headers: HeaderMap,
}

impl ApiClientBuilder {
    fn new(config: ClientConfig) -> Self {
        Self {
            config,
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets the client token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Sets the namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = Some(namespace.into());
        self
    }

    /// Sets the API version segment (`v1` by default).
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Sets a prefix inserted between the version and every path.
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.path_prefix = Some(prefix.into());
        self
    }

    /// Sets the request timeout.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::builder(address)
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the header name or value
    /// is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the token or namespace cannot be sent as a
    /// header, or if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let mut headers = self.default_headers;

        if let Some(token) = &self.config.token {
            let mut value = HeaderValue::try_from(token.as_str())
                .map_err(|e| ConfigError::InvalidHeader(format!("invalid token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(TOKEN_HEADER), value);
        }
        if let Some(namespace) = &self.config.namespace {
            let value = HeaderValue::try_from(namespace.as_str())
                .map_err(|e| ConfigError::InvalidHeader(format!("invalid namespace: {e}")))?;
            headers.insert(HeaderName::from_static(NAMESPACE_HEADER), value);
        }

        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .default_headers(headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(TransportError::Request)?;

        Ok(ApiClient {
            client,
            config: self.config,
        })
    }
}

/// Async HTTP client for a Vault server.
///
/// The client wraps `reqwest::Client` with connection pooling and the
/// Vault token and namespace headers. It implements [`Transport`], so any
/// generated [`Operation`](crate::Operation) can run over it.
///
/// ## Examples
///
/// ```rust,ignore
/// use vault_api::{generate, ApiClient, Request};
///
/// let client = ApiClient::from_env()?;
/// let lookup = generate(&lookup_self_contract, &client)?;
/// let payload = lookup.invoke(Request::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a new builder for a server at `address`.
    pub fn builder(address: Url) -> ApiClientBuilder {
        ApiClientBuilder::new(ClientConfig::new(address))
    }

    /// Creates a new builder seeded with `config`.
    pub fn builder_from_config(config: ClientConfig) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    /// Creates a client with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(address: Url) -> Result<Self, ApiError> {
        Self::builder(address).build()
    }

    /// Creates a client from a prepared configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        Self::builder_from_config(config).build()
    }

    /// Creates a client from the `VAULT_*` environment variables.
    ///
    /// ## Errors
    ///
    /// Returns an error if the environment holds unusable values.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the server address.
    pub fn address(&self) -> &Url {
        &self.config.address
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                duration_ms: u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if error.is_connect() {
            TransportError::Connection(error.to_string())
        } else {
            TransportError::Request(error)
        }
    }
}

impl Transport for ApiClient {
    #[instrument(
        name = "vault_request",
        skip(self, request),
        fields(
            http.method = %request.method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self
            .config
            .url_for(&request.path)
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
        Span::current().record("http.url", url.as_str());

        let mut builder = self.client.request(request.method.to_reqwest()?, url);
        match &request.body {
            Some(body) if request.method.has_body() => builder = builder.json(body),
            Some(_) => {
                debug!(method = %request.method, "Dropping body for a method without one");
            }
            None => {}
        }

        let response = builder.send().await.map_err(|e| {
            Span::current().record("otel.status_code", "ERROR");
            warn!(error = %e, "Vault request failed");
            self.classify(e)
        })?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        let otel_status = if status.is_server_error() {
            "ERROR"
        } else if status.is_success() {
            "OK"
        } else {
            "UNSET"
        };
        Span::current().record("otel.status_code", otel_status);

        Ok(TransportResponse::new(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::RestMethod;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(method: RestMethod, path: &str) -> TransportRequest {
        TransportRequest {
            method,
            path: path.to_string(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_send_get_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/auth/token/lookup-self"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
            .mount(&mock_server)
            .await;

        let address = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(address).unwrap();

        let response = client
            .send(request(RestMethod::Get, "/auth/token/lookup-self"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&response.body).unwrap(),
            json!({ "data": {} })
        );
    }

    #[tokio::test]
    async fn test_list_verb_reaches_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("LIST"))
            .and(path("/v1/auth/token/roles"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "keys": ["ops"] } })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(Url::parse(&mock_server.uri()).unwrap()).unwrap();
        let response = client
            .send(request(RestMethod::List, "/auth/token/roles"))
            .await
            .unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_token_and_namespace_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/auth/token/revoke-self"))
            .and(header(TOKEN_HEADER, "s.root"))
            .and(header(NAMESPACE_HEADER, "team-a"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::builder(Url::parse(&mock_server.uri()).unwrap())
            .token("s.root")
            .namespace("team-a")
            .build()
            .unwrap();

        let response = client
            .send(request(RestMethod::Post, "/auth/token/revoke-self"))
            .await
            .unwrap();
        assert_eq!(response.status, 204);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn test_json_body_and_default_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/auth/token/lookup"))
            .and(header_exists("x-request-source"))
            .and(body_json(json!({ "token": "s.abc" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::builder(Url::parse(&mock_server.uri()).unwrap())
            .default_header("X-Request-Source", "tests")
            .unwrap()
            .build()
            .unwrap();

        let mut outbound = request(RestMethod::Post, "/auth/token/lookup");
        outbound.body = Some(json!({ "token": "s.abc" }));
        client.send(outbound).await.unwrap();
    }

    #[tokio::test]
    async fn test_body_dropped_for_bodiless_method() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/auth/token/roles/ops"))
            .and(|req: &wiremock::Request| req.body.is_empty())
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(Url::parse(&mock_server.uri()).unwrap()).unwrap();

        let mut outbound = request(RestMethod::Delete, "/auth/token/roles/ops");
        outbound.body = Some(json!({ "role_name": "ops" }));
        let response = client.send(outbound).await.unwrap();
        assert_eq!(response.status, 204);
    }

    #[tokio::test]
    async fn test_path_prefix_and_version() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/mounts/team/auth/token/roles/a%2Fb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::builder(Url::parse(&mock_server.uri()).unwrap())
            .api_version("v2")
            .path_prefix("/mounts/team/")
            .build()
            .unwrap();

        let response = client
            .send(request(RestMethod::Get, "/auth/token/roles/a%2Fb"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_error_status_is_not_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "errors": ["permission denied"] })),
            )
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(Url::parse(&mock_server.uri()).unwrap()).unwrap();
        let response = client
            .send(request(RestMethod::Get, "/auth/token/lookup-self"))
            .await
            .unwrap();
        assert_eq!(response.status, 403);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&mock_server)
            .await;

        let client = ApiClient::builder(Url::parse(&mock_server.uri()).unwrap())
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();

        let err = client
            .send(request(RestMethod::Get, "/auth/token/lookup-self"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Timeout { duration_ms: 50 }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_invalid_default_header() {
        let err = ApiClient::builder(Url::parse("http://127.0.0.1:8200").unwrap())
            .default_header("bad header", "value")
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(ConfigError::InvalidHeader(_))));
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err = ApiClient::builder(Url::parse("http://127.0.0.1:8200").unwrap())
            .token("line\nbreak")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(ConfigError::InvalidHeader(_))));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_send_records_span() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(Url::parse(&mock_server.uri()).unwrap()).unwrap();
        client
            .send(request(RestMethod::Get, "/sys/health"))
            .await
            .unwrap();

        // Span fields are only logged alongside an event.
        let unreachable = ApiClient::new(Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let err = unreachable
            .send(request(RestMethod::Get, "/sys/health"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connection(_)));
        assert!(logs_contain("vault_request"));
        assert!(logs_contain("Vault request failed"));
    }
}
