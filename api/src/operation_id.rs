//! Validated registry keys for operations.

use std::borrow::Borrow;
use std::fmt;

use thiserror::Error;

/// A validated operation identifier.
///
/// Rules:
/// 1. Must start with a lowercase ASCII letter.
/// 2. Remaining characters must be lowercase ASCII letters, digits or `_`.
///
/// Identifiers double as registry keys, so `create_orphan` and
/// `lookup_accessor` are valid while `Create-Orphan` is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(String);

/// Why a candidate [`OperationId`] was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationIdError {
    #[error("operation id cannot be empty")]
    Empty,
    #[error("operation id must start with a lowercase letter")]
    InvalidStartCharacter,
    #[error("operation id contains invalid character: '{0}'")]
    InvalidCharacter(char),
}

impl OperationId {
    /// Creates a new identifier, validating its characters.
    pub fn new(id: impl Into<String>) -> Result<Self, OperationIdError> {
        let s = id.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), OperationIdError> {
        let mut chars = s.chars();

        match chars.next() {
            None => return Err(OperationIdError::Empty),
            Some(c) if !c.is_ascii_lowercase() => {
                return Err(OperationIdError::InvalidStartCharacter)
            }
            _ => {}
        }

        for c in chars {
            if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
                return Err(OperationIdError::InvalidCharacter(c));
            }
        }

        Ok(())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OperationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for OperationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<OperationId> for String {
    fn from(id: OperationId) -> Self {
        id.0
    }
}

impl TryFrom<String> for OperationId {
    type Error = OperationIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for OperationId {
    type Error = OperationIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
