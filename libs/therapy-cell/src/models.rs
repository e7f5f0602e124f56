use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// THERAPY SESSION MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TherapySession {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub therapy_type: TherapyType,
    pub scheduled_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: SessionStatus,
    pub notes: Option<String>,
    #[serde(default)]
    pub precautions: Vec<Precaution>,
    pub feedback: Option<SessionFeedback>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Rescheduled,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Scheduled => write!(f, "scheduled"),
            SessionStatus::InProgress => write!(f, "in_progress"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Cancelled => write!(f, "cancelled"),
            SessionStatus::Rescheduled => write!(f, "rescheduled"),
        }
    }
}

/// A Panchakarma therapy offering; `id` is the catalogue slug
/// ("vamana", "virechana", ...), not an entity id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TherapyType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration: i32,
    #[serde(default)]
    pub preparation: Vec<String>,
    #[serde(default)]
    pub post_care: Vec<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Precaution {
    #[serde(rename = "type")]
    pub kind: PrecautionKind,
    pub title: String,
    pub description: String,
    /// e.g. "2 hours before", "immediately after"
    pub timing: String,
    pub is_required: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PrecautionKind {
    Pre,
    Post,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionFeedback {
    pub session_id: Uuid,
    /// 1-5
    pub rating: u8,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub side_effects: Vec<String>,
    pub comments: String,
    pub submitted_at: DateTime<Utc>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapyBookingRequest {
    pub therapy_type_id: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Local session filters; also the source of the list query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionFilters {
    pub status: Option<SessionStatus>,
    pub therapy_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SessionFilters {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        if let Some(therapy_type) = &self.therapy_type {
            query.push(("therapyType", therapy_type.clone()));
        }
        if let Some(start_date) = self.start_date {
            query.push(("startDate", start_date.to_string()));
        }
        if let Some(end_date) = self.end_date {
            query.push(("endDate", end_date.to_string()));
        }
        query
    }
}
