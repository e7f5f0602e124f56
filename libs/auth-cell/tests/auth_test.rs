use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_cell::{AuthOps, AuthService, AuthState, LoginRequest};
use shared_api::ApiClient;
use shared_store::Store;
use shared_utils::storage::TokenStore;
use shared_utils::test_utils::TestConfig;
use shared_utils::{keys, LocalStore};

fn user_json(id: Uuid, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": email,
        "name": "Asha Patel",
        "role": "patient",
        "createdAt": "2024-01-15T09:00:00Z"
    })
}

fn setup(uri: &str, dir: &tempfile::TempDir) -> (LocalStore, AuthOps) {
    let storage = LocalStore::open(dir.path().join("local_store.json"));
    let config = TestConfig::with_api_base(uri).to_app_config();
    let api = ApiClient::new(&config, TokenStore::new(storage.clone()));
    (storage.clone(), AuthOps::new(AuthService::new(api), storage))
}

#[tokio::test]
async fn login_persists_the_token_and_cached_user_once() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let user_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({ "email": "asha@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": user_json(user_id, "asha@example.com"),
                "token": "opaque-bearer"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (storage, ops) = setup(&server.uri(), &dir);
    let store = Store::spawn(AuthState::default());

    ops.login(
        &store,
        LoginRequest {
            email: "asha@example.com".to_string(),
            password: "secret".to_string(),
            remember_me: true,
        },
    )
    .await;
    store.flush().await;

    let state = store.state();
    assert!(state.is_authenticated);
    assert!(!state.is_loading);
    assert_eq!(state.user.as_ref().map(|u| u.id), Some(user_id));

    assert_eq!(
        storage.get_as::<String>(keys::AUTH_TOKEN),
        Some("opaque-bearer".to_string())
    );
    assert!(storage.get(keys::USER_DATA).is_some());
}

#[tokio::test]
async fn failed_login_stores_the_message_and_keeps_storage_empty() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let (storage, ops) = setup(&server.uri(), &dir);
    let store = Store::spawn(AuthState::default());

    ops.login(
        &store,
        LoginRequest {
            email: "asha@example.com".to_string(),
            password: "wrong".to_string(),
            remember_me: false,
        },
    )
    .await;
    store.flush().await;

    let state = store.state();
    assert!(!state.is_authenticated);
    assert_eq!(state.error.as_deref(), Some("Invalid email or password"));
    assert_eq!(storage.get(keys::AUTH_TOKEN), None);
}

#[tokio::test]
async fn logout_clears_local_state_even_when_the_server_fails() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (storage, ops) = setup(&server.uri(), &dir);
    storage.set(keys::AUTH_TOKEN, &"stale-token");
    storage.set(keys::USER_DATA, &user_json(Uuid::new_v4(), "asha@example.com"));

    let store = Store::spawn(AuthState::default());
    ops.logout(&store).await;
    store.flush().await;

    assert!(!store.state().is_authenticated);
    assert_eq!(storage.get(keys::AUTH_TOKEN), None);
    assert_eq!(storage.get(keys::USER_DATA), None);
}

#[tokio::test]
async fn restore_session_rebuilds_auth_from_persisted_state() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let user_id = Uuid::new_v4();

    let (storage, ops) = setup(&server.uri(), &dir);
    storage.set(keys::AUTH_TOKEN, &"opaque-bearer");
    storage.set(keys::USER_DATA, &user_json(user_id, "asha@example.com"));

    let store = Store::spawn(AuthState::default());
    let restored = ops.restore_session(&store);
    store.flush().await;

    assert_eq!(restored.map(|u| u.id), Some(user_id));
    assert!(store.state().is_authenticated);
}

#[tokio::test]
async fn restore_session_without_a_token_stays_logged_out() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let (_storage, ops) = setup(&server.uri(), &dir);
    let store = Store::spawn(AuthState::default());

    assert!(ops.restore_session(&store).is_none());
    store.flush().await;
    assert!(!store.state().is_authenticated);
}
