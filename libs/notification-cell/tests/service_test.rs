use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notification_cell::{
    NotificationOps, NotificationQuery, NotificationService, NotificationType, NotificationsState,
};
use shared_api::ApiClient;
use shared_models::ApiError;
use shared_store::Store;
use shared_utils::storage::TokenStore;
use shared_utils::test_utils::TestConfig;
use shared_utils::{keys, LocalStore};

fn service_for(uri: &str, dir: &tempfile::TempDir) -> NotificationService {
    let store = LocalStore::open(dir.path().join("local_store.json"));
    store.set(keys::AUTH_TOKEN, &"test-token");
    let config = TestConfig::with_api_base(uri).to_app_config();
    NotificationService::new(ApiClient::new(&config, TokenStore::new(store)))
}

fn notification_json(id: Uuid, is_read: bool) -> serde_json::Value {
    json!({
        "id": id,
        "user": Uuid::new_v4(),
        "type": "appointment_reminder",
        "title": "Appointment Reminder",
        "message": "You have an appointment tomorrow at 10:00",
        "data": { "appointmentId": Uuid::new_v4() },
        "isRead": is_read,
        "priority": "high",
        "deliveryMethod": ["in_app", "email"],
        "createdAt": "2024-05-01T08:00:00Z"
    })
}

#[tokio::test]
async fn list_sends_only_defined_filters_and_parses_the_page() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(path("/notifications"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("type", "appointment_reminder"))
        .and(query_param("isRead", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "notifications": [notification_json(Uuid::new_v4(), false)],
                "unreadCount": 1,
                "pagination": { "page": 1, "limit": 10, "total": 1, "totalPages": 1 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server.uri(), &dir);
    let query = NotificationQuery {
        kind: Some(NotificationType::AppointmentReminder),
        is_read: Some(false),
        ..Default::default()
    };

    let page = service.list(&query).await.expect("list should succeed");
    assert_eq!(page.notifications.len(), 1);
    assert!(!page.notifications[0].is_read);
}

#[tokio::test]
async fn mark_read_unwraps_the_nested_entity() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let id = Uuid::new_v4();

    Mock::given(method("PUT"))
        .and(path(format!("/notifications/{}/read", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "notification": notification_json(id, true) }
        })))
        .mount(&server)
        .await;

    let service = service_for(&server.uri(), &dir);
    let updated = service.mark_read(id).await.expect("mark_read should succeed");
    assert_eq!(updated.id, id);
    assert!(updated.is_read);
}

#[tokio::test]
async fn mark_all_read_and_delete_accept_data_less_envelopes() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let id = Uuid::new_v4();

    Mock::given(method("PUT"))
        .and(path("/notifications/read-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/notifications/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let service = service_for(&server.uri(), &dir);
    service.mark_all_read().await.expect("mark_all_read");
    service.delete(id).await.expect("delete");
}

#[tokio::test]
async fn server_message_wins_over_the_fallback() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "message": "Notification store unavailable"
        })))
        .mount(&server)
        .await;

    let service = service_for(&server.uri(), &dir);
    let result = service.list(&NotificationQuery::default()).await;

    assert_matches!(result, Err(ApiError::Http { status: 500, message }) => {
        assert_eq!(message, "Notification store unavailable");
    });
}

#[tokio::test]
async fn empty_error_bodies_fall_back_to_the_operation_message() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let service = service_for(&server.uri(), &dir);
    let err = service
        .list(&NotificationQuery::default())
        .await
        .expect_err("should fail");
    assert_eq!(err.to_string(), "Failed to fetch notifications");
}

#[tokio::test]
async fn fetch_op_populates_the_slice_through_the_store() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "notifications": [
                    notification_json(Uuid::new_v4(), false),
                    notification_json(Uuid::new_v4(), true)
                ],
                "unreadCount": 99,
                "pagination": null
            }
        })))
        .mount(&server)
        .await;

    let store = Store::spawn(NotificationsState::default());
    let ops = NotificationOps::new(service_for(&server.uri(), &dir));

    ops.fetch(&store, NotificationQuery::default()).await;
    store.flush().await;

    let state = store.state();
    assert_eq!(state.notifications.len(), 2);
    // The server claimed 99 unread; the slice derives the real count.
    assert_eq!(state.unread_count, 1);
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
}
