//! URL path templates with `{{name}}` placeholders.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};

use crate::error::{ConfigError, FieldPath, Issue, IssueKind};

/// Characters left unescaped inside a substituted path segment (RFC 3986
/// unreserved set). Everything else, `/` included, is percent-encoded so a
/// value can never introduce an extra segment. Values that are exactly `.`
/// or `..` are dot segments and are rejected by [`PathTemplate::dot_segments`].
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Placeholder(String),
}

/// A parsed URL path template.
///
/// ## Examples
///
/// ```rust
/// use serde_json::json;
/// use vault_api::PathTemplate;
///
/// let template = PathTemplate::parse("/auth/token/roles/{{role_name}}").unwrap();
/// assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["role_name"]);
///
/// let params = json!({ "role_name": "admin" });
/// let path = template.render("read_role", params.as_object().unwrap()).unwrap();
/// assert_eq!(path, "/auth/token/roles/admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    parts: Vec<Part>,
}

impl PathTemplate {
    /// Parses a template.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidPathTemplate`] for an unclosed `{{`, a
    /// stray `}}`, an empty or non-identifier placeholder name, or a name
    /// used twice.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut parts = Vec::new();
        let mut rest = raw;

        while let Some(open) = rest.find("{{") {
            let literal = &rest[..open];
            if literal.contains("}}") {
                return Err(ConfigError::invalid_template(raw, "unmatched '}}'"));
            }
            if !literal.is_empty() {
                parts.push(Part::Literal(literal.to_string()));
            }

            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                return Err(ConfigError::invalid_template(raw, "unclosed placeholder"));
            };
            let name = &after_open[..close];
            if name.is_empty() {
                return Err(ConfigError::invalid_template(raw, "empty placeholder name"));
            }
            if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConfigError::invalid_template(
                    raw,
                    format!("invalid placeholder name '{name}'"),
                ));
            }
            if parts
                .iter()
                .any(|p| matches!(p, Part::Placeholder(existing) if existing == name))
            {
                return Err(ConfigError::invalid_template(
                    raw,
                    format!("placeholder '{name}' appears twice"),
                ));
            }
            parts.push(Part::Placeholder(name.to_string()));
            rest = &after_open[close + 2..];
        }

        if rest.contains("}}") {
            return Err(ConfigError::invalid_template(raw, "unmatched '}}'"));
        }
        if !rest.is_empty() {
            parts.push(Part::Literal(rest.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            parts,
        })
    }

    /// Returns the template exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns placeholder names in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|p| match p {
            Part::Placeholder(name) => Some(name.as_str()),
            Part::Literal(_) => None,
        })
    }

    /// Returns `true` if the template has no placeholders.
    pub fn is_static(&self) -> bool {
        self.placeholders().next().is_none()
    }

    /// Reports every placeholder whose value is `.` or `..`.
    ///
    /// Such a value survives encoding as `%2E`, which URL parsers still
    /// treat as a dot segment, so it would change the endpoint reached.
    pub fn dot_segments(&self, params: &Map<String, Value>) -> Vec<Issue> {
        self.placeholders()
            .filter(|name| {
                params
                    .get(*name)
                    .and_then(Value::as_str)
                    .is_some_and(is_dot_segment)
            })
            .map(|name| Issue::new(FieldPath::root().key(name), IssueKind::DotSegment))
            .collect()
    }

    /// Substitutes every placeholder with its percent-encoded value.
    ///
    /// Strings are used verbatim; numbers and booleans use their JSON text.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnsubstitutedPlaceholder`] if a placeholder
    /// has no value and [`ConfigError::NonScalarPathParam`] if its value is
    /// `null`, an array or an object.
    pub fn render(&self, operation: &str, params: &Map<String, Value>) -> Result<String, ConfigError> {
        let mut path = String::with_capacity(self.raw.len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => path.push_str(text),
                Part::Placeholder(name) => {
                    let segment = match params.get(name) {
                        Some(Value::String(s)) => s.clone(),
                        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
                        Some(_) => {
                            return Err(ConfigError::NonScalarPathParam {
                                operation: operation.to_string(),
                                placeholder: name.clone(),
                            })
                        }
                        None => {
                            return Err(ConfigError::UnsubstitutedPlaceholder {
                                operation: operation.to_string(),
                                placeholder: name.clone(),
                            })
                        }
                    };
                    if is_dot_segment(&segment) {
                        path.push_str(&"%2E".repeat(segment.len()));
                    } else {
                        path.extend(utf8_percent_encode(&segment, PATH_SEGMENT));
                    }
                }
            }
        }
        Ok(path)
    }
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}
