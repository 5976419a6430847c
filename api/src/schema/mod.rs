//! Runtime shape descriptions for request and response documents.
//!
//! A [`Validator`] is a composable, pure and total description of a JSON
//! shape. Validating a document either yields a normalized copy (defaults
//! applied, undeclared keys handled per the object's [`UnknownKeys`]
//! policy) or a [`ValidationError`](crate::error::ValidationError) listing
//! every violated field.
//!
//! ## Examples
//!
//! ```rust
//! use serde_json::json;
//! use vault_api::schema::Validator;
//!
//! let body = Validator::object([
//!     ("policies", Validator::array(Validator::string()).optional()),
//!     ("renewable", Validator::boolean().default(true)),
//!     ("display_name", Validator::string().default("token")),
//! ]);
//!
//! let validated = body.validate(&json!({})).unwrap();
//! assert_eq!(validated, json!({ "renewable": true, "display_name": "token" }));
//! ```

mod object;
mod validator;

pub use object::{ObjectSchema, UnknownKeys};
pub use validator::Validator;

use serde_json::Value;

/// Returns the JSON type name used in validation messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
