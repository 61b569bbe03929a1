use super::*;
use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::http::{HttpMethod, MockHttpClient, RequestBody};
use crate::messages;
use crate::storage::MemoryStore;
use serde_json::json;

const BASE: &str = "http://localhost:8080";

// =========================================================
// 辅助函数
// =========================================================

fn setup() -> (
    MockHttpClient,
    MemoryStore,
    SessionStore<MockHttpClient, MemoryStore>,
) {
    let client = MockHttpClient::new();
    let store = MemoryStore::new();
    let api = ApiClient::new(client.clone(), store.clone(), ApiConfig::new(BASE));
    (client, store, SessionStore::new(api))
}

fn auth_body(username: &str) -> serde_json::Value {
    json!({
        "token": format!("jwt-{}", username),
        "username": username,
        "email": format!("{}@ged.com", username),
        "role": "USER"
    })
}

// =========================================================
// login
// =========================================================

#[tokio::test]
async fn test_login_persists_session() {
    let (client, store, session) = setup();
    client.mock_response(
        HttpMethod::Post,
        &format!("{}/api/auth/login", BASE),
        200,
        auth_body("ana"),
    );

    assert!(!session.is_authenticated());
    let result = session.login("ana", "segredo").await.unwrap();

    assert_eq!(result.token, "jwt-ana");
    assert_eq!(result.username, "ana");
    assert!(session.is_authenticated());
    assert_eq!(store.get(STORAGE_TOKEN_KEY).as_deref(), Some("jwt-ana"));
    assert_eq!(store.get(STORAGE_USERNAME_KEY).as_deref(), Some("ana"));
    assert_eq!(session.session(), Some(result));

    // 请求体与认证头
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body,
        RequestBody::Json(r#"{"username":"ana","password":"segredo"}"#.to_string())
    );
    assert!(requests[0].header(crate::HEADER_AUTHORIZATION).is_none());
}

#[tokio::test]
async fn test_login_then_logout_clears_everything() {
    let (client, store, session) = setup();
    client.mock_response(
        HttpMethod::Post,
        &format!("{}/api/auth/login", BASE),
        200,
        auth_body("bruno"),
    );

    session.login("bruno", "pw").await.unwrap();
    assert!(session.is_authenticated());

    session.logout();
    assert!(!session.is_authenticated());
    assert!(store.is_empty());
    assert_eq!(session.username(), "");
    assert_eq!(session.session(), None);

    // 重复注销是无副作用的
    session.logout();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_rejected_surfaces_auth_error() {
    let (client, store, session) = setup();
    client.mock_response(
        HttpMethod::Post,
        &format!("{}/api/auth/login", BASE),
        401,
        json!({ "error": "Unauthorized", "message": "Credenciais inválidas" }),
    );

    let err = session.login("ana", "errada").await.unwrap_err();
    assert_eq!(err, ClientError::auth("Credenciais inválidas"));
    assert!(!session.is_authenticated());
    assert!(store.is_empty());
    // 不重试
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn test_login_rejected_without_message_uses_fallback() {
    let (client, _store, session) = setup();
    client.mock_response(
        HttpMethod::Post,
        &format!("{}/api/auth/login", BASE),
        500,
        json!(null),
    );

    let err = session.login("ana", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), messages::LOGIN_FAILED);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let (client, _store, session) = setup();

    let err = session.login("", "pw").await.unwrap_err();
    assert_eq!(err, ClientError::validation(messages::LOGIN_FIELDS_REQUIRED));
    let err = session.login("ana", "").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_login_network_failure() {
    let (client, _store, session) = setup();
    client.mock_failure(HttpMethod::Post, &format!("{}/api/auth/login", BASE));

    let err = session.login("ana", "pw").await.unwrap_err();
    assert_eq!(err, ClientError::network(messages::LOGIN_FAILED));
    assert!(!session.is_authenticated());
}

// =========================================================
// register
// =========================================================

#[tokio::test]
async fn test_register_persists_session() {
    let (client, store, session) = setup();
    client.mock_response(
        HttpMethod::Post,
        &format!("{}/api/auth/register", BASE),
        201,
        auth_body("carla"),
    );

    let result = session
        .register("carla", "carla@ged.com", "pw")
        .await
        .unwrap();

    assert_eq!(result.username, "carla");
    assert!(session.is_authenticated());
    assert_eq!(store.get(STORAGE_USERNAME_KEY).as_deref(), Some("carla"));
}

#[tokio::test]
async fn test_register_invalid_email_never_hits_network() {
    let (client, _store, session) = setup();

    for email in ["carla", "carla@ged", "carla @ged.com", "@ged.com"] {
        let err = session.register("carla", email, "pw").await.unwrap_err();
        assert_eq!(err, ClientError::validation(messages::INVALID_EMAIL));
    }
    let err = session.register("", "carla@ged.com", "pw").await.unwrap_err();
    assert_eq!(err, ClientError::validation(messages::REGISTER_FIELDS_REQUIRED));

    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_register_conflict_is_auth_error() {
    let (client, _store, session) = setup();
    client.mock_response(
        HttpMethod::Post,
        &format!("{}/api/auth/register", BASE),
        409,
        json!({ "message": "Username already exists" }),
    );

    let err = session
        .register("carla", "carla@ged.com", "pw")
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::auth("Username already exists"));
}

#[test]
fn test_empty_token_is_not_a_session() {
    let (_client, store, session) = setup();
    store.set(STORAGE_TOKEN_KEY, "");
    assert!(!session.is_authenticated());
    assert_eq!(session.token(), None);
}
