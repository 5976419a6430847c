//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Address used when `VAULT_ADDR` is unset.
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8200";

/// Default API version segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything an [`ApiClient`](super::ApiClient) needs to reach Vault.
///
/// Request URLs are built as `{address}/{api_version}{path_prefix}{path}`.
///
/// ## Examples
///
/// ```rust
/// use url::Url;
/// use vault_api::ClientConfig;
///
/// let mut config = ClientConfig::new(Url::parse("https://vault.internal:8200/").unwrap());
/// config.path_prefix = Some("/ns-mount".to_string());
///
/// let url = config.url_for("/auth/token/lookup-self").unwrap();
/// assert_eq!(url.as_str(), "https://vault.internal:8200/v1/ns-mount/auth/token/lookup-self");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the Vault server.
    pub address: Url,
    /// Sent as `X-Vault-Token`.
    pub token: Option<String>,
    /// Sent as `X-Vault-Namespace`.
    pub namespace: Option<String>,
    /// Version segment inserted before every path. Empty disables it.
    pub api_version: String,
    /// Extra segments between the version and the operation path.
    pub path_prefix: Option<String>,
    /// Per-request timeout, covering connect through the last body byte.
    pub timeout: Duration,
}

impl ClientConfig {
    /// A configuration for `address` with every other setting defaulted.
    pub fn new(address: Url) -> Self {
        Self {
            address,
            token: None,
            namespace: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            path_prefix: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads `VAULT_ADDR`, `VAULT_TOKEN`, `VAULT_NAMESPACE` and
    /// `VAULT_CLIENT_TIMEOUT` from the process environment.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a variable is set to a value
    /// that cannot be used.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through
    /// `lookup`. Empty values count as unset.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for an unparsable address or
    /// timeout.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let address = var("VAULT_ADDR").unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let address = Url::parse(&address).map_err(|e| ConfigError::InvalidEnv {
            var: "VAULT_ADDR",
            message: e.to_string(),
        })?;

        let mut config = Self::new(address);
        config.token = var("VAULT_TOKEN");
        config.namespace = var("VAULT_NAMESPACE");

        if let Some(raw) = var("VAULT_CLIENT_TIMEOUT") {
            config.timeout = parse_timeout(&raw).ok_or_else(|| ConfigError::InvalidEnv {
                var: "VAULT_CLIENT_TIMEOUT",
                message: format!("expected whole seconds, got '{raw}'"),
            })?;
        }

        Ok(config)
    }

    /// Resolves an operation path against this configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the joined string is not a
    /// valid URL.
    pub fn url_for(&self, path: &str) -> Result<Url, ConfigError> {
        let mut raw = self.address.as_str().trim_end_matches('/').to_string();

        let version = self.api_version.trim_matches('/');
        if !version.is_empty() {
            raw.push('/');
            raw.push_str(version);
        }

        if let Some(prefix) = self.path_prefix.as_deref() {
            let prefix = prefix.trim_matches('/');
            if !prefix.is_empty() {
                raw.push('/');
                raw.push_str(prefix);
            }
        }

        if !path.starts_with('/') {
            raw.push('/');
        }
        raw.push_str(path);

        Ok(Url::parse(&raw)?)
    }
}

/// Accepts `30` or `30s`.
fn parse_timeout(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let secs = raw.strip_suffix('s').unwrap_or(raw);
    secs.parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.address.as_str(), "http://127.0.0.1:8200/");
        assert_eq!(config.token, None);
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_reads_environment() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("VAULT_ADDR", "https://vault.example.com:8200"),
            ("VAULT_TOKEN", "s.root"),
            ("VAULT_NAMESPACE", "team-a"),
            ("VAULT_CLIENT_TIMEOUT", "5s"),
        ]))
        .unwrap();

        assert_eq!(config.address.host_str(), Some("vault.example.com"));
        assert_eq!(config.token.as_deref(), Some("s.root"));
        assert_eq!(config.namespace.as_deref(), Some("team-a"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = ClientConfig::from_lookup(lookup(&[("VAULT_TOKEN", "  ")])).unwrap();
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_invalid_address() {
        let err = ClientConfig::from_lookup(lookup(&[("VAULT_ADDR", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var, .. } if var == "VAULT_ADDR"));
    }

    #[test]
    fn test_invalid_timeout() {
        let err =
            ClientConfig::from_lookup(lookup(&[("VAULT_CLIENT_TIMEOUT", "soon")])).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnv { var, .. } if var == "VAULT_CLIENT_TIMEOUT")
        );
    }

    #[test]
    fn test_url_for_keeps_version_segment() {
        let config = ClientConfig::new(Url::parse("http://127.0.0.1:8200").unwrap());
        let url = config.url_for("/auth/token/roles/a%2Fb").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8200/v1/auth/token/roles/a%2Fb");
    }

    #[test]
    fn test_url_for_without_version() {
        let mut config = ClientConfig::new(Url::parse("http://vault:8200/proxy/").unwrap());
        config.api_version = String::new();
        let url = config.url_for("auth/token/tidy").unwrap();
        assert_eq!(url.as_str(), "http://vault:8200/proxy/auth/token/tidy");
    }
}
