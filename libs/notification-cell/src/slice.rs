use tracing::{debug, warn};
use uuid::Uuid;

use shared_store::{FetchGate, Reducer};

use crate::models::Notification;

/// Client-side copy of the user's notifications.
///
/// `unread_count` is derived state: after every transition it must
/// equal the number of entities in `notifications` with
/// `is_read == false`. It is never taken from the server.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationsState {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
    pub is_loading: bool,
    pub error: Option<String>,
    pub fetch_gate: FetchGate,
}

impl NotificationsState {
    pub fn find(&self, id: Uuid) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }
}

#[derive(Debug)]
pub enum NotificationAction {
    FetchPending { seq: u64 },
    FetchFulfilled { seq: u64, notifications: Vec<Notification> },
    FetchRejected { seq: u64, message: String },
    MarkReadFulfilled { notification: Box<Notification> },
    MarkAllReadFulfilled,
    DeleteFulfilled { id: Uuid },
    /// A push from the real-time channel. Must be idempotent: a
    /// duplicate id never double-inserts or double-increments.
    LiveInserted(Box<Notification>),
    MutationRejected { message: String },
    ClearError,
}

impl Reducer for NotificationsState {
    type Action = NotificationAction;

    fn reduce(&mut self, action: NotificationAction) {
        match action {
            NotificationAction::FetchPending { seq: _ } => {
                self.is_loading = true;
                self.error = None;
            }
            NotificationAction::FetchFulfilled { seq, notifications } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale notification fetch (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = None;
                self.notifications = notifications;
                // Authoritative resync: recount from scratch.
                self.unread_count = self.notifications.iter().filter(|n| !n.is_read).count();
            }
            NotificationAction::FetchRejected { seq, message } => {
                if !self.fetch_gate.admit(seq) {
                    debug!("Discarding stale notification fetch failure (seq {})", seq);
                    return;
                }
                self.is_loading = false;
                self.error = Some(message);
            }
            NotificationAction::MarkReadFulfilled { notification } => {
                match self.notifications.iter_mut().find(|n| n.id == notification.id) {
                    Some(existing) => {
                        if !existing.is_read {
                            self.unread_count = self.unread_count.saturating_sub(1);
                        }
                        *existing = *notification;
                        existing.is_read = true;
                    }
                    None => {
                        warn!("Mark-read for notification {} not in the visible set", notification.id);
                    }
                }
            }
            NotificationAction::MarkAllReadFulfilled => {
                for notification in &mut self.notifications {
                    notification.is_read = true;
                }
                self.unread_count = 0;
            }
            NotificationAction::DeleteFulfilled { id } => {
                match self.notifications.iter().position(|n| n.id == id) {
                    Some(index) => {
                        let removed = self.notifications.remove(index);
                        if !removed.is_read {
                            self.unread_count = self.unread_count.saturating_sub(1);
                        }
                    }
                    None => {
                        warn!("Delete for notification {} not in the visible set", id);
                    }
                }
            }
            NotificationAction::LiveInserted(notification) => {
                if self.notifications.iter().any(|n| n.id == notification.id) {
                    debug!("Duplicate live notification {}, ignoring", notification.id);
                    return;
                }
                if !notification.is_read {
                    self.unread_count += 1;
                }
                self.notifications.insert(0, *notification);
            }
            NotificationAction::MutationRejected { message } => {
                self.error = Some(message);
            }
            NotificationAction::ClearError => {
                self.error = None;
            }
        }
    }
}
