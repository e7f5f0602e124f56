use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use shared_models::Pagination;

// ==============================================================================
// CORE NOTIFICATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub data: Value,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub priority: NotificationPriority,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivery_method: Vec<DeliveryMethod>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    SessionReminder,
    PrecautionAlert,
    SessionCancelled,
    SessionRescheduled,
    FeedbackRequest,
    AppointmentReminder,
    AppointmentConfirmation,
    AppointmentCancelled,
    AppointmentRescheduled,
    TreatmentReminder,
    TreatmentStageCompleted,
    TreatmentCompleted,
    PaymentConfirmation,
    PaymentFailed,
    General,
    System,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationType::SessionReminder => write!(f, "session_reminder"),
            NotificationType::PrecautionAlert => write!(f, "precaution_alert"),
            NotificationType::SessionCancelled => write!(f, "session_cancelled"),
            NotificationType::SessionRescheduled => write!(f, "session_rescheduled"),
            NotificationType::FeedbackRequest => write!(f, "feedback_request"),
            NotificationType::AppointmentReminder => write!(f, "appointment_reminder"),
            NotificationType::AppointmentConfirmation => write!(f, "appointment_confirmation"),
            NotificationType::AppointmentCancelled => write!(f, "appointment_cancelled"),
            NotificationType::AppointmentRescheduled => write!(f, "appointment_rescheduled"),
            NotificationType::TreatmentReminder => write!(f, "treatment_reminder"),
            NotificationType::TreatmentStageCompleted => write!(f, "treatment_stage_completed"),
            NotificationType::TreatmentCompleted => write!(f, "treatment_completed"),
            NotificationType::PaymentConfirmation => write!(f, "payment_confirmation"),
            NotificationType::PaymentFailed => write!(f, "payment_failed"),
            NotificationType::General => write!(f, "general"),
            NotificationType::System => write!(f, "system"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    InApp,
    Email,
    Sms,
    Push,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// `GET /notifications` payload. The server computes its own unread
/// count; the slice never trusts it and always re-derives the count
/// from the visible set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub unread_count: u64,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub kind: Option<NotificationType>,
    pub is_read: Option<bool>,
}

impl NotificationQuery {
    /// Only defined parameters end up on the wire.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(kind) = self.kind {
            query.push(("type", kind.to_string()));
        }
        if let Some(is_read) = self.is_read {
            query.push(("isRead", is_read.to_string()));
        }
        query
    }
}
