use serde::{Deserialize, Serialize};
use uuid::Uuid;

use notification_cell::Notification;

/// Frames the client sends. The `join` frame announces the
/// authenticated user right after connecting so the server can route
/// that user's pushes onto this connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientFrame {
    #[serde(rename_all = "camelCase")]
    Join { user_id: Uuid },
}

/// Frames the server pushes. Unrecognized events are tolerated so the
/// protocol can grow without breaking older clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerFrame {
    NewNotification(Box<Notification>),
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn join_frame_uses_the_wire_shape() {
        let user_id = Uuid::new_v4();
        let frame = serde_json::to_value(ClientFrame::Join { user_id }).unwrap();
        assert_eq!(frame, json!({ "event": "join", "data": { "userId": user_id } }));
    }

    #[test]
    fn new_notification_frames_parse() {
        let body = json!({
            "event": "new_notification",
            "data": {
                "id": Uuid::new_v4(),
                "user": Uuid::new_v4(),
                "type": "general",
                "title": "Reminder",
                "message": "Drink warm water before the session",
                "isRead": false,
                "priority": "low",
                "createdAt": "2024-05-01T08:00:00Z"
            }
        });

        let frame: ServerFrame = serde_json::from_value(body).unwrap();
        match frame {
            ServerFrame::NewNotification(n) => assert_eq!(n.title, "Reminder"),
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn unknown_events_are_tolerated() {
        let frame: ServerFrame =
            serde_json::from_value(serde_json::json!({ "event": "presence_update" })).unwrap();
        assert!(matches!(frame, ServerFrame::Unknown));
    }
}
