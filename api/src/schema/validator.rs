//! The composable validator type.

use serde_json::{Map, Value};

use super::{json_type_name, ObjectSchema, UnknownKeys};
use crate::error::{FieldPath, Issue, IssueKind, ValidationError};

/// A composable description of a JSON shape.
///
/// Leaf validators match a single JSON type; containers and modifiers wrap
/// other validators. Validation never mutates its input and always
/// terminates with either a normalized value or every issue found.
///
/// Modifiers follow these rules:
/// - [`optional`](Self::optional) accepts an absent value and keeps it absent.
/// - [`nullable`](Self::nullable) accepts `null` and preserves it.
/// - [`default`](Self::default) substitutes its value only when the input is
///   absent, then validates the substitute with the wrapped validator.
/// - [`Validator::Any`] accepts anything, including absence, and forwards it
///   verbatim.
#[derive(Debug, Clone)]
pub enum Validator {
    /// Opaque passthrough: accepts and forwards any value.
    Any,
    /// A JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON number with no fractional part.
    Integer,
    /// A JSON boolean.
    Boolean,
    /// Exactly this value.
    Literal(Value),
    /// An array whose elements all match the inner validator.
    Array(Box<Validator>),
    /// An object with arbitrary keys whose values match the inner validator.
    Record(Box<Validator>),
    /// An object with declared fields.
    Object(ObjectSchema),
    /// The first matching member wins.
    Union(Vec<Validator>),
    /// The inner validator, or absent.
    Optional(Box<Validator>),
    /// The inner validator, or `null`.
    Nullable(Box<Validator>),
    /// The inner validator, with a substitute for an absent value.
    Default(Box<Validator>, Value),
    /// A validator built on demand, for recursive shapes.
    Lazy(fn() -> Validator),
}

impl Validator {
    /// Accepts anything.
    pub fn any() -> Self {
        Self::Any
    }

    /// Accepts a JSON string.
    pub fn string() -> Self {
        Self::String
    }

    /// Accepts any JSON number.
    pub fn number() -> Self {
        Self::Number
    }

    /// Accepts an integral JSON number.
    pub fn integer() -> Self {
        Self::Integer
    }

    /// Accepts a JSON boolean.
    pub fn boolean() -> Self {
        Self::Boolean
    }

    /// Accepts exactly `value`.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Accepts an array of `item`.
    pub fn array(item: Validator) -> Self {
        Self::Array(Box::new(item))
    }

    /// Accepts an object with any keys and `value`-shaped values.
    pub fn record(value: Validator) -> Self {
        Self::Record(Box::new(value))
    }

    /// Accepts an object with the declared fields, stripping unknown keys.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Validator)>,
    {
        Self::Object(ObjectSchema::new(fields))
    }

    /// Accepts a value matching any of `variants`, tried in order.
    pub fn union(variants: impl IntoIterator<Item = Validator>) -> Self {
        Self::Union(variants.into_iter().collect())
    }

    /// Defers construction, allowing a validator to refer to itself.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use serde_json::json;
    /// use vault_api::schema::Validator;
    ///
    /// fn tree() -> Validator {
    ///     Validator::object([
    ///         ("name", Validator::string()),
    ///         ("children", Validator::array(Validator::lazy(tree)).optional()),
    ///     ])
    /// }
    ///
    /// let doc = json!({ "name": "root", "children": [{ "name": "leaf" }] });
    /// assert!(tree().validate(&doc).is_ok());
    /// ```
    pub fn lazy(build: fn() -> Validator) -> Self {
        Self::Lazy(build)
    }

    /// Also accepts an absent value.
    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Also accepts `null`.
    pub fn nullable(self) -> Self {
        Self::Nullable(Box::new(self))
    }

    /// Substitutes `value` when the input is absent.
    pub fn default(self, value: impl Into<Value>) -> Self {
        Self::Default(Box::new(self), value.into())
    }

    /// Rejects undeclared keys. No effect on non-object validators.
    pub fn strict(self) -> Self {
        self.with_unknown_keys(UnknownKeys::Strict)
    }

    /// Keeps undeclared keys. No effect on non-object validators.
    pub fn passthrough(self) -> Self {
        self.with_unknown_keys(UnknownKeys::Passthrough)
    }

    fn with_unknown_keys(self, policy: UnknownKeys) -> Self {
        match self {
            Self::Object(schema) => Self::Object(schema.unknown_keys(policy)),
            other => other,
        }
    }

    /// Returns `true` if an absent value satisfies this validator.
    pub fn accepts_absent(&self) -> bool {
        match self {
            Self::Any | Self::Optional(_) | Self::Default(..) => true,
            Self::Nullable(inner) => inner.accepts_absent(),
            Self::Union(variants) => variants.iter().any(Validator::accepts_absent),
            Self::Lazy(build) => build().accepts_absent(),
            _ => false,
        }
    }

    /// Returns the object schema if this validator is a plain object.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(schema) => Some(schema),
            _ => None,
        }
    }

    /// Human-readable summary of the accepted shape.
    pub fn describe(&self) -> String {
        match self {
            Self::Any => "any".to_string(),
            Self::String => "string".to_string(),
            Self::Number => "number".to_string(),
            Self::Integer => "integer".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Literal(value) => format!("literal {value}"),
            Self::Array(item) => format!("array of {}", item.describe()),
            Self::Record(value) => format!("record of {}", value.describe()),
            Self::Object(_) => "object".to_string(),
            Self::Union(variants) => variants
                .iter()
                .map(Validator::describe)
                .collect::<Vec<_>>()
                .join(" | "),
            Self::Optional(inner) | Self::Default(inner, _) => inner.describe(),
            Self::Nullable(inner) => format!("{} | null", inner.describe()),
            Self::Lazy(build) => build().describe(),
        }
    }

    /// Validates a present document.
    ///
    /// ## Errors
    ///
    /// Returns every issue found if the document does not match.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        self.validate_input(Some(value))?.ok_or_else(|| {
            ValidationError::new(vec![Issue::new(FieldPath::root(), IssueKind::Required)])
        })
    }

    /// Validates a possibly absent document.
    ///
    /// Returns `Ok(None)` when the document is absent and this validator
    /// accepts absence.
    ///
    /// ## Errors
    ///
    /// Returns every issue found if the document does not match.
    pub fn validate_input(&self, value: Option<&Value>) -> Result<Option<Value>, ValidationError> {
        let mut issues = Vec::new();
        let output = self.check(value, &FieldPath::root(), &mut issues);
        if issues.is_empty() {
            Ok(output)
        } else {
            Err(ValidationError::new(issues))
        }
    }

    /// Validates `value` located at `path`, pushing issues as they are found.
    ///
    /// The returned value is only meaningful when no issue was pushed.
    pub(crate) fn check(
        &self,
        value: Option<&Value>,
        path: &FieldPath,
        issues: &mut Vec<Issue>,
    ) -> Option<Value> {
        match self {
            Self::Any => return value.cloned(),
            Self::Optional(inner) => return value.and_then(|v| inner.check(Some(v), path, issues)),
            Self::Default(inner, fallback) => {
                return inner.check(Some(value.unwrap_or(fallback)), path, issues)
            }
            Self::Nullable(inner) => {
                return match value {
                    Some(Value::Null) => Some(Value::Null),
                    other => inner.check(other, path, issues),
                }
            }
            Self::Lazy(build) => return build().check(value, path, issues),
            Self::Union(variants) => return self.check_union(variants, value, path, issues),
            _ => {}
        }

        let Some(value) = value else {
            issues.push(Issue::new(path.clone(), IssueKind::Required));
            return None;
        };

        match self {
            Self::String => self.expect_type(value.is_string(), value, path, issues),
            Self::Number => self.expect_type(value.is_number(), value, path, issues),
            Self::Integer => self.expect_type(is_integral(value), value, path, issues),
            Self::Boolean => self.expect_type(value.is_boolean(), value, path, issues),
            Self::Literal(expected) => {
                if value == expected {
                    Some(value.clone())
                } else {
                    issues.push(Issue::new(
                        path.clone(),
                        IssueKind::InvalidLiteral {
                            expected: expected.clone(),
                        },
                    ));
                    None
                }
            }
            Self::Array(item) => {
                let Some(elements) = value.as_array() else {
                    return self.expect_type(false, value, path, issues);
                };
                let validated = elements
                    .iter()
                    .enumerate()
                    .filter_map(|(i, element)| item.check(Some(element), &path.index(i), issues))
                    .collect();
                Some(Value::Array(validated))
            }
            Self::Record(inner) => {
                let Some(entries) = value.as_object() else {
                    return self.expect_type(false, value, path, issues);
                };
                let mut validated = Map::new();
                for (key, entry) in entries {
                    if let Some(v) = inner.check(Some(entry), &path.key(key), issues) {
                        validated.insert(key.clone(), v);
                    }
                }
                Some(Value::Object(validated))
            }
            Self::Object(schema) => schema.check(value, path, issues),
            Self::Any
            | Self::Optional(_)
            | Self::Default(..)
            | Self::Nullable(_)
            | Self::Lazy(_)
            | Self::Union(_) => unreachable!("modifiers handled above"),
        }
    }

    fn check_union(
        &self,
        variants: &[Validator],
        value: Option<&Value>,
        path: &FieldPath,
        issues: &mut Vec<Issue>,
    ) -> Option<Value> {
        for variant in variants {
            let mut attempt = Vec::new();
            let output = variant.check(value, path, &mut attempt);
            if attempt.is_empty() {
                return output;
            }
        }

        let kind = match value {
            None => IssueKind::Required,
            Some(_) => IssueKind::InvalidUnion {
                expected: self.describe(),
            },
        };
        issues.push(Issue::new(path.clone(), kind));
        None
    }

    fn expect_type(
        &self,
        matches: bool,
        value: &Value,
        path: &FieldPath,
        issues: &mut Vec<Issue>,
    ) -> Option<Value> {
        if matches {
            return Some(value.clone());
        }
        issues.push(Issue::new(
            path.clone(),
            IssueKind::InvalidType {
                expected: self.describe(),
                found: json_type_name(value),
            },
        ));
        None
    }
}

fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.fract() == 0.0),
        _ => false,
    }
}
