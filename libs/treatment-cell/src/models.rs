use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ==============================================================================
// TREATMENT PLAN MODELS
// ==============================================================================

/// Day-by-day Panchakarma plan for one patient. Created once via an AI
/// generation plus a save; afterwards mutated by doctor edits and by
/// patient day-feedback submissions. There is no delete operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_name: String,
    pub summary: Option<String>,
    #[serde(default)]
    pub schedule: Vec<DayPlan>,
    /// Intake form the plan was generated from; shape owned by the
    /// backend.
    pub form_data: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TreatmentPlan {
    pub fn day(&self, day: u32) -> Option<&DayPlan> {
        self.schedule.iter().find(|d| d.day == day)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,
    /// Free-text tasks for the day.
    #[serde(default)]
    pub plan: Vec<String>,
    pub doctor_consultation: Option<String>,
    pub therapist_name: Option<String>,
    pub feedback: Option<DayFeedback>,
}

/// Patient-submitted feedback for one plan day. Numeric scales are
/// 0-10; the categorical fields carry the intake form's display
/// values verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayFeedback {
    pub pain_level: u8,
    pub stress_level: u8,
    pub energy_level: u8,
    pub appetite: String,
    pub digestion: String,
    pub sleep_quality: String,
    pub mental_state: String,
    pub notes: Option<String>,
    pub submission_date: DateTime<Utc>,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTreatmentPlanRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub schedule: Vec<DayPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_data: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTreatmentPlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<DayPlan>>,
}

/// What the external planner returns for a free-text report. Opaque
/// collaborator: no envelope, no retry, no timeout.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedPlan {
    #[serde(default)]
    pub summary: Option<String>,
    pub schedule: Vec<DayPlan>,
}
