//! Contract authoring defects and client configuration errors.

use thiserror::Error;

use crate::operation_id::OperationIdError;

/// Errors in contract declarations or client configuration.
///
/// These indicate defects in code or environment rather than bad caller
/// input. They are fatal: retrying the same call cannot succeed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {var}: {message}")]
    InvalidEnv {
        /// The environment variable name.
        var: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A default header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Operation ID validation failed.
    #[error("Invalid operation ID: {0}")]
    InvalidOperationId(#[from] OperationIdError),

    /// Duplicate operation ID in a registry.
    #[error("Duplicate operation ID: {id}")]
    DuplicateOperation {
        /// The duplicate operation ID.
        id: String,
    },

    /// No operation is registered under the requested name.
    #[error("Unknown operation: {name}")]
    UnknownOperation {
        /// The requested name.
        name: String,
    },

    /// Path template has malformed placeholder syntax.
    #[error("Invalid path template '{template}': {message}")]
    InvalidPathTemplate {
        /// The offending template.
        template: String,
        /// Description of the syntax error.
        message: String,
    },

    /// Template placeholders and path schema keys disagree.
    #[error(
        "Operation '{operation}' path template and path schema disagree \
         (placeholders without schema key: {unmatched_placeholders:?}, \
         schema keys without placeholder: {unmatched_keys:?})"
    )]
    PlaceholderMismatch {
        /// The operation being generated.
        operation: String,
        /// Placeholders with no matching schema key.
        unmatched_placeholders: Vec<String>,
        /// Schema keys with no matching placeholder.
        unmatched_keys: Vec<String>,
    },

    /// The path schema is not an object validator.
    #[error("Operation '{operation}' declares a path schema that is not an object")]
    PathSchemaNotObject {
        /// The operation being generated.
        operation: String,
    },

    /// A placeholder had no value to substitute at invocation time.
    #[error("Operation '{operation}' left placeholder '{{{{{placeholder}}}}}' unsubstituted")]
    UnsubstitutedPlaceholder {
        /// The operation being invoked.
        operation: String,
        /// The placeholder name.
        placeholder: String,
    },

    /// A path value validated but cannot be rendered into a URL segment.
    #[error("Operation '{operation}' path parameter '{placeholder}' is not a scalar value")]
    NonScalarPathParam {
        /// The operation being invoked.
        operation: String,
        /// The placeholder name.
        placeholder: String,
    },
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid path template error.
    pub fn invalid_template(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPathTemplate {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error points at a contract declaration rather
    /// than at client configuration.
    pub fn is_contract_defect(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperationId(_)
                | Self::DuplicateOperation { .. }
                | Self::InvalidPathTemplate { .. }
                | Self::PlaceholderMismatch { .. }
                | Self::PathSchemaNotObject { .. }
                | Self::UnsubstitutedPlaceholder { .. }
                | Self::NonScalarPathParam { .. }
        )
    }
}
