//! HTTP method types for Vault operations.

use strum::{Display, EnumIter, EnumString};

use crate::error::TransportError;

/// HTTP methods used by Vault operations.
///
/// Alongside the standard verbs this includes [`RestMethod::List`], the
/// non-standard verb Vault uses for key listings. It travels through the
/// same dispatch path as every other method.
///
/// ## Examples
///
/// ```rust
/// use vault_api::RestMethod;
///
/// let method = RestMethod::List;
/// assert_eq!(method.to_string(), "LIST");
/// assert!(!method.has_body());
///
/// let parsed: RestMethod = "POST".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Post);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Read a resource.
    Get,
    /// HTTP POST - Write a resource or trigger an action.
    Post,
    /// HTTP PUT - Alias of POST on Vault.
    Put,
    /// HTTP PATCH - Partially update a resource.
    Patch,
    /// HTTP DELETE - Remove a resource.
    Delete,
    /// HTTP HEAD - Retrieve headers only.
    Head,
    /// Vault LIST - List the keys under a path.
    List,
}

impl RestMethod {
    /// Returns `true` if this method carries a request body. The client
    /// drops any body attached to other methods.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Converts to the equivalent `reqwest::Method`.
    ///
    /// ## Errors
    ///
    /// Returns [`TransportError::InvalidMethod`] if an extension verb is
    /// rejected by the HTTP layer.
    pub fn to_reqwest(self) -> Result<reqwest::Method, TransportError> {
        let method = match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
            Self::List => reqwest::Method::from_bytes(b"LIST")
                .map_err(|e| TransportError::InvalidMethod(format!("LIST: {e}")))?,
        };
        Ok(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        assert_eq!(RestMethod::Get.to_string(), "GET");
        assert_eq!(RestMethod::Post.to_string(), "POST");
        assert_eq!(RestMethod::List.to_string(), "LIST");
    }

    #[test]
    fn test_parse() {
        assert_eq!("GET".parse::<RestMethod>().unwrap(), RestMethod::Get);
        assert_eq!("LIST".parse::<RestMethod>().unwrap(), RestMethod::List);
        assert!("FETCH".parse::<RestMethod>().is_err());
    }

    #[test]
    fn test_has_body() {
        assert!(!RestMethod::Get.has_body());
        assert!(RestMethod::Post.has_body());
        assert!(!RestMethod::List.has_body());
        assert!(!RestMethod::Delete.has_body());
    }

    #[test]
    fn test_every_method_converts() {
        for method in RestMethod::iter() {
            assert_eq!(method.to_reqwest().unwrap().as_str(), method.to_string());
        }
    }

    #[test]
    fn test_to_reqwest() {
        assert_eq!(RestMethod::Get.to_reqwest().unwrap(), reqwest::Method::GET);
        assert_eq!(RestMethod::Delete.to_reqwest().unwrap(), reqwest::Method::DELETE);
        assert_eq!(RestMethod::List.to_reqwest().unwrap().as_str(), "LIST");
    }
}
