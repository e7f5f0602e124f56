use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notification_cell::{
    Notification, NotificationOps, NotificationPriority, NotificationService, NotificationType,
    NotificationsState,
};
use realtime_cell::{
    ChannelConfig, ClientFrame, Connector, PushTransport, RealtimeChannel, RealtimeError,
    ServerFrame,
};
use shared_api::ApiClient;
use shared_store::{Dispatch, Store};
use shared_utils::storage::TokenStore;
use shared_utils::test_utils::TestConfig;
use shared_utils::{keys, LocalStore};

fn notification(title: &str) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        user: Uuid::new_v4(),
        kind: NotificationType::General,
        title: title.to_string(),
        message: "push payload".to_string(),
        data: json!({}),
        is_read: false,
        read_at: None,
        priority: NotificationPriority::Medium,
        scheduled_for: None,
        sent_at: None,
        delivery_method: Vec::new(),
        created_at: Utc::now(),
        updated_at: None,
    }
}

struct FakeTransport {
    sent: mpsc::UnboundedSender<ClientFrame>,
    inbound: mpsc::UnboundedReceiver<ServerFrame>,
}

#[async_trait]
impl PushTransport for FakeTransport {
    async fn send(&mut self, frame: ClientFrame) -> Result<(), RealtimeError> {
        self.sent
            .send(frame)
            .map_err(|e| RealtimeError::Send(e.to_string()))
    }

    async fn next_frame(&mut self) -> Option<ServerFrame> {
        self.inbound.recv().await
    }

    async fn close(&mut self) {
        self.inbound.close();
    }
}

/// Hands out one pre-built transport per connect call; refuses once
/// the script runs out.
struct FakeConnector {
    sessions: Mutex<VecDeque<FakeTransport>>,
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self) -> Result<Box<dyn PushTransport>, RealtimeError> {
        let mut sessions = self.sessions.lock().await;
        match sessions.pop_front() {
            Some(transport) => Ok(Box::new(transport)),
            None => Err(RealtimeError::Connect("no more sessions scripted".to_string())),
        }
    }
}

struct Session {
    push: mpsc::UnboundedSender<ServerFrame>,
    sent: mpsc::UnboundedReceiver<ClientFrame>,
}

fn scripted_sessions(count: usize) -> (Arc<FakeConnector>, Vec<Session>) {
    let mut transports = VecDeque::new();
    let mut handles = Vec::new();
    for _ in 0..count {
        let (push_tx, push_rx) = mpsc::unbounded_channel();
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        transports.push_back(FakeTransport {
            sent: sent_tx,
            inbound: push_rx,
        });
        handles.push(Session {
            push: push_tx,
            sent: sent_rx,
        });
    }
    (
        Arc::new(FakeConnector {
            sessions: Mutex::new(transports),
        }),
        handles,
    )
}

fn ops_for(uri: &str, dir: &tempfile::TempDir) -> Arc<NotificationOps> {
    let store = LocalStore::open(dir.path().join("local_store.json"));
    store.set(keys::AUTH_TOKEN, &"test-token");
    let config = TestConfig::with_api_base(uri).to_app_config();
    let api = ApiClient::new(&config, TokenStore::new(store));
    Arc::new(NotificationOps::new(NotificationService::new(api)))
}

fn fast_config() -> ChannelConfig {
    ChannelConfig {
        initial_backoff: Duration::from_millis(10),
        max_backoff: Duration::from_millis(50),
    }
}

#[tokio::test]
async fn announces_the_user_then_relays_pushes_idempotently() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ops = ops_for("http://127.0.0.1:1", &dir);
    let (connector, mut sessions) = scripted_sessions(1);
    let mut session = sessions.remove(0);

    let user_id = Uuid::new_v4();
    let store = Store::spawn(NotificationsState::default());
    let channel = RealtimeChannel::connect_with_config(
        connector,
        user_id,
        store.clone(),
        ops,
        fast_config(),
    );

    // The first outbound frame is the join announcement.
    let joined = session.sent.recv().await.expect("join frame");
    assert_eq!(joined, ClientFrame::Join { user_id });

    let pushed = notification("Reminder");
    session
        .push
        .send(ServerFrame::NewNotification(Box::new(pushed.clone())))
        .unwrap();
    // The same event delivered twice must not double-insert.
    session
        .push
        .send(ServerFrame::NewNotification(Box::new(pushed.clone())))
        .unwrap();
    let second = notification("Second");
    session
        .push
        .send(ServerFrame::NewNotification(Box::new(second.clone())))
        .unwrap();

    // Wait for the store to show both entities.
    let mut updates = store.subscribe();
    loop {
        if updates.borrow().notifications.len() == 2 {
            break;
        }
        updates.changed().await.expect("store alive");
    }

    let state = store.state();
    assert_eq!(state.notifications.len(), 2);
    assert_eq!(state.notifications[0].id, second.id);
    assert_eq!(state.notifications[1].id, pushed.id);
    assert_eq!(state.unread_count, 2);

    channel.close().await;
}

#[tokio::test]
async fn pushed_event_lands_at_index_zero_and_bumps_unread_by_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ops = ops_for("http://127.0.0.1:1", &dir);
    let (connector, mut sessions) = scripted_sessions(1);
    let mut session = sessions.remove(0);

    let store = Store::spawn(NotificationsState::default());
    // Pre-existing state from an earlier fetch.
    let mut seeded = notification("Old");
    seeded.is_read = true;
    store.dispatch(notification_cell::NotificationAction::FetchFulfilled {
        seq: 1,
        notifications: vec![seeded],
    });
    store.flush().await;
    let before = store.state().unread_count;

    let channel = RealtimeChannel::connect_with_config(
        connector,
        Uuid::new_v4(),
        store.clone(),
        ops,
        fast_config(),
    );
    session.sent.recv().await.expect("join frame");

    let pushed = notification("Reminder");
    session
        .push
        .send(ServerFrame::NewNotification(Box::new(pushed.clone())))
        .unwrap();

    let mut updates = store.subscribe();
    loop {
        if updates.borrow().notifications.len() == 2 {
            break;
        }
        updates.changed().await.expect("store alive");
    }

    let state = store.state();
    assert_eq!(state.notifications[0].id, pushed.id);
    assert_eq!(state.unread_count, before + 1);

    channel.close().await;
}

#[tokio::test]
async fn reconnects_after_a_drop_and_resyncs_the_collection() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    // The resync fetch returns the notification pushed during the gap.
    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "notifications": [{
                    "id": Uuid::new_v4(),
                    "user": Uuid::new_v4(),
                    "type": "general",
                    "title": "Missed while offline",
                    "message": "arrived during the gap",
                    "isRead": false,
                    "priority": "medium",
                    "createdAt": "2024-05-01T08:00:00Z"
                }],
                "unreadCount": 1
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ops = ops_for(&server.uri(), &dir);
    let (connector, mut sessions) = scripted_sessions(2);
    let mut second = sessions.remove(1);
    let mut first = sessions.remove(0);

    let user_id = Uuid::new_v4();
    let store = Store::spawn(NotificationsState::default());
    let channel = RealtimeChannel::connect_with_config(
        connector,
        user_id,
        store.clone(),
        ops,
        fast_config(),
    );

    // Wait for the first join, then drop the connection: closing the
    // push side ends the transport's frame stream.
    first.sent.recv().await.expect("first join frame");
    drop(first);

    // The channel reconnects, joins again, and resyncs.
    let rejoined = second.sent.recv().await.expect("second join frame");
    assert_eq!(rejoined, ClientFrame::Join { user_id });

    let mut updates = store.subscribe();
    loop {
        if updates.borrow().notifications.len() == 1 {
            break;
        }
        updates.changed().await.expect("store alive");
    }

    let state = store.state();
    assert_eq!(state.notifications[0].title, "Missed while offline");
    assert_eq!(state.unread_count, 1);

    channel.close().await;
}

#[tokio::test]
async fn close_tears_the_connection_down() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ops = ops_for("http://127.0.0.1:1", &dir);
    let (connector, mut sessions) = scripted_sessions(1);
    let mut session = sessions.remove(0);

    let store = Store::spawn(NotificationsState::default());
    let channel = RealtimeChannel::connect_with_config(
        connector,
        Uuid::new_v4(),
        store.clone(),
        ops,
        fast_config(),
    );
    session.sent.recv().await.expect("join frame");

    channel.close().await;

    // Pushes after teardown go nowhere: the task is finished, so the
    // store never sees the event.
    let _ = session
        .push
        .send(ServerFrame::NewNotification(Box::new(notification("late"))));
    store.flush().await;
    assert!(store.state().notifications.is_empty());
}
