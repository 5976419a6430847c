//! Object shapes with declared fields.

use serde_json::{Map, Value};

use super::{json_type_name, Validator};
use crate::error::{FieldPath, Issue, IssueKind};

/// What an object does with keys it does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Drop undeclared keys from the validated output.
    #[default]
    Strip,
    /// Keep undeclared keys untouched.
    Passthrough,
    /// Report every undeclared key as an issue.
    Strict,
}

/// An object with a fixed set of named fields.
///
/// Fields are validated in declaration order. A field whose validator
/// accepts absence (`optional`, `default`, `any`) may be missing from the
/// input; every other field is required.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, Validator)>,
    unknown_keys: UnknownKeys,
}

impl ObjectSchema {
    /// Creates an object schema from `(name, validator)` pairs.
    pub fn new<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Validator)>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            unknown_keys: UnknownKeys::Strip,
        }
    }

    /// Sets the unknown-key policy.
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Returns the current unknown-key policy.
    pub fn unknown_keys_policy(&self) -> UnknownKeys {
        self.unknown_keys
    }

    /// Returns the declared field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the validator declared for a field.
    pub fn field(&self, name: &str) -> Option<&Validator> {
        self.fields
            .iter()
            .find_map(|(k, v)| (k == name).then_some(v))
    }

    pub(crate) fn check(
        &self,
        value: &Value,
        path: &FieldPath,
        issues: &mut Vec<Issue>,
    ) -> Option<Value> {
        let Some(input) = value.as_object() else {
            issues.push(Issue::new(
                path.clone(),
                IssueKind::InvalidType {
                    expected: "object".to_string(),
                    found: json_type_name(value),
                },
            ));
            return None;
        };

        let mut output = Map::new();
        for (key, validator) in &self.fields {
            if let Some(validated) = validator.check(input.get(key), &path.key(key), issues) {
                output.insert(key.clone(), validated);
            }
        }

        for (key, extra) in input {
            if self.field(key).is_some() {
                continue;
            }
            match self.unknown_keys {
                UnknownKeys::Strip => {}
                UnknownKeys::Passthrough => {
                    output.insert(key.clone(), extra.clone());
                }
                UnknownKeys::Strict => {
                    issues.push(Issue::new(path.key(key), IssueKind::UnrecognizedKey));
                }
            }
        }

        Some(Value::Object(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn role() -> ObjectSchema {
        ObjectSchema::new([
            ("name", Validator::string()),
            ("orphan", Validator::boolean().optional()),
        ])
    }

    #[test]
    fn test_strip_drops_undeclared_keys() {
        let validated = Validator::Object(role())
            .validate(&json!({ "name": "ops", "mount_type": "token" }))
            .unwrap();
        assert_eq!(validated, json!({ "name": "ops" }));
    }

    #[test]
    fn test_passthrough_keeps_undeclared_keys() {
        let schema = Validator::Object(role().unknown_keys(UnknownKeys::Passthrough));
        let validated = schema
            .validate(&json!({ "name": "ops", "mount_type": "token" }))
            .unwrap();
        assert_eq!(validated, json!({ "name": "ops", "mount_type": "token" }));
    }

    #[test]
    fn test_strict_reports_undeclared_keys() {
        let schema = Validator::Object(role().unknown_keys(UnknownKeys::Strict));
        let err = schema
            .validate(&json!({ "name": "ops", "colour": "red" }))
            .unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].kind, IssueKind::UnrecognizedKey);
        assert!(err.involves("colour"));
    }

    #[test]
    fn test_keys_in_declaration_order() {
        let role = role();
        let keys: Vec<_> = role.keys().collect();
        assert_eq!(keys, vec!["name", "orphan"]);
    }

    #[test]
    fn test_non_object_input() {
        let err = Validator::Object(role()).validate(&json!(["ops"])).unwrap_err();
        assert_eq!(
            err.issues()[0].kind,
            IssueKind::InvalidType {
                expected: "object".to_string(),
                found: "array",
            }
        );
    }
}
