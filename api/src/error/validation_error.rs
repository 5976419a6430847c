//! Structured input/output validation failures.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// One step in the location of a value inside a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

/// Location of a value inside a validated document.
///
/// Renders as a dotted path with bracketed indices, e.g.
/// `auth.policies[2]`. The document root renders as `(root)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended with an object key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Returns a new path extended with an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Returns `true` if this path points at the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path segments from the root down.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// What was wrong with a single value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IssueKind {
    /// A required value was absent.
    #[error("required")]
    Required,

    /// The value had the wrong JSON type (including a disallowed `null`).
    #[error("expected {expected}, found {found}")]
    InvalidType {
        /// Description of the accepted shape.
        expected: String,
        /// JSON type name of the value received.
        found: &'static str,
    },

    /// The value did not equal the declared literal.
    #[error("expected literal {expected}")]
    InvalidLiteral {
        /// The only accepted value.
        expected: Value,
    },

    /// None of the union members accepted the value.
    #[error("no variant matched (expected {expected})")]
    InvalidUnion {
        /// Description of the union members.
        expected: String,
    },

    /// The object carried a key a strict object does not declare.
    #[error("unrecognized key")]
    UnrecognizedKey,

    /// A path parameter equal to `.` or `..`, which URL normalization
    /// would resolve against the surrounding path.
    #[error("dot segment cannot be used as a path parameter")]
    DotSegment,

    /// The value could not be represented at all (serialization failure).
    #[error("unrepresentable value: {0}")]
    Unrepresentable(String),
}

/// A single violated field.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Where the violation happened.
    pub path: FieldPath,
    /// What the violation was.
    pub kind: IssueKind,
}

impl Issue {
    /// Creates an issue at the given location.
    pub fn new(path: FieldPath, kind: IssueKind) -> Self {
        Self { path, kind }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// Every violation found while validating one document.
///
/// Validators collect all issues instead of stopping at the first, so a
/// caller fixing their input sees the whole list at once.
///
/// ## Examples
///
/// ```rust
/// use vault_api::error::{FieldPath, Issue, IssueKind, ValidationError};
///
/// let err = ValidationError::new(vec![Issue::new(
///     FieldPath::root().key("accessor"),
///     IssueKind::Required,
/// )]);
/// assert!(err.involves("accessor"));
/// assert_eq!(err.to_string(), "accessor: required");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    /// Wraps a list of issues.
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Returns every collected issue.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consumes the error, returning its issues.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Returns the rendered path of every offending field.
    pub fn fields(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.path.to_string()).collect()
    }

    /// Returns `true` if any issue is located at the given rendered path.
    pub fn involves(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.path.to_string() == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.issues.iter().map(Issue::to_string).collect();
        f.write_str(&rendered.join("; "))
    }
}
