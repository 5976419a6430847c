//! Shape declarations shared by the token operations.

use serde_json::Value;
use vault_api::schema::Validator;

fn strings() -> Validator {
    Validator::array(Validator::string())
}

fn string_map() -> Validator {
    Validator::record(Validator::string())
}

/// TTL-like parameters Vault accepts as `"1h"` or as whole seconds.
fn duration() -> Validator {
    Validator::union([Validator::string(), Validator::integer()])
}

/// `{ role_name }`, the only path parameter in this method.
pub(crate) fn role_name_params() -> Validator {
    Validator::object([("role_name", Validator::string())])
}

pub(crate) fn token_body() -> Validator {
    Validator::object([("token", Validator::string())])
}

pub(crate) fn accessor_body() -> Validator {
    Validator::object([("accessor", Validator::string())])
}

pub(crate) fn renew_body() -> Validator {
    Validator::object([
        ("token", Validator::string()),
        ("increment", duration().optional()),
    ])
}

pub(crate) fn renew_self_body() -> Validator {
    Validator::object([("increment", duration().optional())]).default(serde_json::json!({}))
}

pub(crate) fn renew_accessor_body() -> Validator {
    Validator::object([
        ("accessor", Validator::string()),
        ("increment", duration().optional()),
    ])
}

/// Parameters for the three create endpoints.
///
/// `renewable` and `display_name` are filled in when omitted.
pub(crate) fn create_body() -> Validator {
    Validator::object([
        ("id", Validator::string().optional()),
        ("role_name", Validator::string().optional()),
        ("policies", strings().optional()),
        ("meta", string_map().optional()),
        ("no_parent", Validator::boolean().optional()),
        ("no_default_policy", Validator::boolean().optional()),
        ("renewable", Validator::boolean().default(true)),
        ("lease", Validator::string().optional()),
        ("ttl", Validator::string().optional()),
        ("type", Validator::string().optional()),
        ("explicit_max_ttl", Validator::string().optional()),
        ("display_name", Validator::string().default("token")),
        ("num_uses", Validator::integer().optional()),
        ("period", Validator::string().optional()),
        ("entity_alias", Validator::string().optional()),
    ])
}

fn auth_block() -> Validator {
    Validator::object([
        ("client_token", Validator::string()),
        ("accessor", Validator::string()),
        ("policies", strings()),
        ("token_policies", strings()),
        ("metadata", string_map().nullable()),
        ("lease_duration", Validator::integer()),
        ("renewable", Validator::boolean()),
        ("entity_id", Validator::string()),
        ("token_type", Validator::string()),
        ("orphan", Validator::boolean()),
        ("num_uses", Validator::integer()),
    ])
}

/// The envelope returned by create and renew.
pub(crate) fn auth_envelope() -> Validator {
    Validator::object([
        ("request_id", Validator::string()),
        ("lease_id", Validator::string().nullable()),
        ("renewable", Validator::boolean()),
        ("lease_duration", Validator::integer()),
        ("data", Validator::any().nullable()),
        ("wrap_info", Validator::any().nullable()),
        ("warnings", strings().nullable()),
        ("auth", auth_block().nullable().default(Value::Null)),
    ])
}

fn lookup_data() -> Validator {
    Validator::object([
        ("accessor", Validator::string()),
        ("creation_time", Validator::integer()),
        ("creation_ttl", Validator::integer()),
        ("display_name", Validator::string()),
        ("entity_id", Validator::string()),
        ("expire_time", Validator::string().nullable().optional()),
        ("explicit_max_ttl", Validator::integer()),
        ("id", Validator::string()),
        ("identity_policies", strings().optional()),
        ("issue_time", Validator::string().optional()),
        ("meta", string_map().nullable().optional()),
        ("num_uses", Validator::integer()),
        ("orphan", Validator::boolean()),
        ("path", Validator::string()),
        ("policies", strings()),
        ("renewable", Validator::boolean().optional()),
        ("ttl", Validator::integer()),
        ("type", Validator::string().optional()),
    ])
}

/// The envelope returned by the three lookup endpoints.
pub(crate) fn lookup_envelope() -> Validator {
    Validator::object([("data", lookup_data())])
}

/// The envelope returned by `LIST` endpoints.
pub(crate) fn keys_envelope() -> Validator {
    Validator::object([
        ("auth", Validator::any()),
        ("warnings", Validator::any()),
        ("wrap_info", Validator::any()),
        ("data", Validator::object([("keys", strings())])),
        ("lease_duration", Validator::integer()),
        ("renewable", Validator::boolean()),
        ("lease_id", Validator::string()),
    ])
}

fn role_fields() -> Vec<(&'static str, Validator)> {
    vec![
        ("allowed_policies", strings().optional()),
        ("disallowed_policies", strings().optional()),
        ("allowed_policies_glob", strings().optional()),
        ("disallowed_policies_glob", strings().optional()),
        ("orphan", Validator::boolean().optional()),
        ("renewable", Validator::boolean().optional()),
        ("path_suffix", Validator::string().optional()),
        ("allowed_entity_aliases", strings().optional()),
        ("token_bound_cidrs", strings().optional()),
        ("token_explicit_max_ttl", duration().optional()),
        ("token_no_default_policy", Validator::boolean().optional()),
        ("token_num_uses", Validator::integer().optional()),
        ("token_period", duration().optional()),
        ("token_type", Validator::string().optional()),
    ]
}

/// Parameters accepted when writing a role.
pub(crate) fn role_body() -> Validator {
    Validator::object(role_fields()).default(serde_json::json!({}))
}

/// The envelope returned when reading a role.
pub(crate) fn role_envelope() -> Validator {
    let mut fields = role_fields();
    fields.insert(0, ("name", Validator::string()));
    Validator::object([("data", Validator::object(fields))])
}
