//! End-to-end tests of the token auth method against a mock Vault server.

use serde_json::{Value, json};
use url::Url;
use vault_api::error::ResponseMismatch;
use vault_api::{ApiClient, ApiError, Request};
use vault_definitions::prelude::*;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::builder(Url::parse(&server.uri()).unwrap())
        .token("s.test")
        .build()
        .unwrap()
}

fn auth_payload() -> Value {
    json!({
        "request_id": "f00341c1-fad5-f6e6-13fd-235617f858a1",
        "lease_id": null,
        "renewable": false,
        "lease_duration": 0,
        "data": null,
        "wrap_info": null,
        "warnings": null,
        "auth": {
            "client_token": "s.child",
            "accessor": "acc-child",
            "policies": ["default"],
            "token_policies": ["default"],
            "metadata": null,
            "lease_duration": 3600,
            "renewable": true,
            "entity_id": "",
            "token_type": "service",
            "orphan": false,
            "num_uses": 0
        }
    })
}

fn lookup_payload() -> Value {
    json!({
        "data": {
            "accessor": "acc-child",
            "creation_time": 1700000000,
            "creation_ttl": 3600,
            "display_name": "token",
            "entity_id": "",
            "expire_time": "2023-11-14T23:13:20Z",
            "explicit_max_ttl": 0,
            "id": "s.child",
            "meta": { "user": "armon" },
            "num_uses": 0,
            "orphan": false,
            "path": "auth/token/create",
            "policies": ["default"],
            "renewable": true,
            "ttl": 3599
        }
    })
}

#[tokio::test]
async fn create_token_sends_defaults_and_returns_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token/create"))
        .and(header("x-vault-token", "s.test"))
        .and(body_json(json!({ "renewable": true, "display_name": "token" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_payload()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let token = TokenMethod::new(&client);

    let raw = token
        .operation("create")
        .unwrap()
        .invoke(Request::new().body(json!({})))
        .await
        .unwrap();
    assert_eq!(raw, Some(auth_payload()));

    let typed = token.create(&CreateTokenRequest::default()).await.unwrap();
    assert_eq!(typed.lease_id, None);
    assert_eq!(typed.auth.unwrap().client_token, "s.child");
}

#[tokio::test]
async fn lookup_accessor_without_accessor_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_payload()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let token = TokenMethod::new(&client);

    let err = token
        .operation("lookup_accessor")
        .unwrap()
        .invoke(Request::new().body(json!({})))
        .await
        .unwrap_err();

    let ApiError::BodyValidation(validation) = err else {
        panic!("expected body validation error");
    };
    assert_eq!(validation.fields(), vec!["accessor"]);
}

#[tokio::test]
async fn lookup_decodes_token_properties() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token/lookup"))
        .and(body_json(json!({ "token": "s.child" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(lookup_payload()))
        .mount(&server)
        .await;

    let client = client(&server);
    let lookup = TokenMethod::new(&client).lookup("s.child").await.unwrap();

    assert_eq!(lookup.data.accessor, "acc-child");
    assert_eq!(lookup.data.meta.unwrap()["user"], "armon");
    assert_eq!(lookup.data.identity_policies, None);
}

#[tokio::test]
async fn response_missing_required_field_carries_raw_payload() {
    let server = MockServer::start().await;

    let mut payload = lookup_payload();
    payload["data"].as_object_mut().unwrap().remove("policies");

    Mock::given(method("GET"))
        .and(path("/v1/auth/token/lookup-self"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = TokenMethod::new(&client).lookup_self().await.unwrap_err();

    let ApiError::ResponseValidation(e) = err else {
        panic!("expected response validation error");
    };
    assert_eq!(e.operation(), "lookup_self");
    assert_eq!(e.status(), 200);
    assert_eq!(e.payload_json(), Some(payload));
    assert!(matches!(e.mismatch(), ResponseMismatch::Schema(v) if v.involves("data.policies")));
}

#[tokio::test]
async fn list_roles_uses_list_verb() {
    let server = MockServer::start().await;

    Mock::given(method("LIST"))
        .and(path("/v1/auth/token/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request_id": "r1",
            "lease_id": "",
            "renewable": false,
            "lease_duration": 0,
            "data": { "keys": ["ops", "ci"] },
            "wrap_info": null,
            "warnings": null,
            "auth": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let roles = TokenMethod::new(&client).list_roles().await.unwrap();
    assert_eq!(roles.data.keys, ["ops", "ci"]);
}

#[tokio::test]
async fn role_name_is_encoded_into_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/auth/token/roles/team%2Fops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "name": "team/ops",
                "allowed_policies": ["dev"],
                "orphan": false,
                "renewable": true,
                "token_period": 0,
                "token_type": "default-service"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let role = TokenMethod::new(&client).read_role("team/ops").await.unwrap();
    assert_eq!(role.data.name, "team/ops");
    assert_eq!(role.data.role.allowed_policies, Some(vec!["dev".to_string()]));
}

#[tokio::test]
async fn write_and_delete_role() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token/roles/ops"))
        .and(body_json(json!({ "allowed_policies": ["dev"], "orphan": true })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/auth/token/roles/ops"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let token = TokenMethod::new(&client);

    let role = TokenRole {
        allowed_policies: Some(vec!["dev".to_string()]),
        orphan: Some(true),
        ..Default::default()
    };
    token.write_role("ops", &role).await.unwrap();
    token.delete_role("ops").await.unwrap();
}

#[tokio::test]
async fn revoke_orphan_targets_its_own_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token/revoke-orphan"))
        .and(body_json(json!({ "token": "s.child" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/auth/token/revoke"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    TokenMethod::new(&client).revoke_orphan("s.child").await.unwrap();
}

#[tokio::test]
async fn renew_self_sends_increment_only_when_set() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token/renew-self"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let renewed = TokenMethod::new(&client)
        .renew_self(&RenewSelfRequest::default())
        .await
        .unwrap();
    assert_eq!(renewed.auth.unwrap().lease_duration, 3600);
}

#[tokio::test]
async fn permission_denied_surfaces_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/auth/token/lookup-self"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "errors": ["permission denied"] })),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let err = TokenMethod::new(&client).lookup_self().await.unwrap_err();

    let ApiError::Service(e) = err else {
        panic!("expected service error");
    };
    assert_eq!(e.status(), 403);
    assert!(e.is_permission_denied());
    assert!(!ApiError::Service(e).is_retryable());
}

#[tokio::test]
async fn tidy_returns_payload_unvalidated() {
    let server = MockServer::start().await;

    let payload = json!({
        "request_id": "r2",
        "warnings": ["Tidy operation successfully started."]
    });
    Mock::given(method("POST"))
        .and(path("/v1/auth/token/tidy"))
        .respond_with(ResponseTemplate::new(202).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let client = client(&server);
    let result = TokenMethod::new(&client).tidy().await.unwrap();
    assert_eq!(result, Some(payload));
}

#[tokio::test]
async fn tidy_passes_through_non_json_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token/tidy"))
        .respond_with(ResponseTemplate::new(202).set_body_string("tidy started"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let result = TokenMethod::new(&client).tidy().await.unwrap();
    assert_eq!(result, Some(Value::String("tidy started".to_string())));
}

#[tokio::test]
async fn dot_segment_role_name_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let token = TokenMethod::new(&client);

    for role_name in ["..", "."] {
        let err = token.delete_role(role_name).await.unwrap_err();
        let ApiError::PathValidation(validation) = err else {
            panic!("expected path validation error for {role_name:?}");
        };
        assert_eq!(validation.fields(), vec!["role_name"]);
    }
}

#[tokio::test]
async fn token_method_exposes_its_transport() {
    let server = MockServer::start().await;
    let client = client(&server);
    let token = TokenMethod::new(&client);

    assert_eq!(token.transport().address().as_str(), client.address().as_str());
    assert_eq!(token.transport().config().token.as_deref(), Some("s.test"));
}
