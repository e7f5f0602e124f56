use chrono::{NaiveDate, NaiveTime};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{
    SessionFeedback, SessionFilters, TherapyBookingRequest, TherapySession, TherapyType,
};

#[derive(Deserialize)]
struct SessionBody {
    session: TherapySession,
}

pub struct TherapyService {
    api: ApiClient,
}

impl TherapyService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn sessions(&self, filters: &SessionFilters) -> Result<Vec<TherapySession>, ApiError> {
        #[derive(Deserialize)]
        struct SessionsBody {
            sessions: Vec<TherapySession>,
        }

        let body: SessionsBody = self
            .api
            .request_with_query(Method::GET, "/therapy/sessions", &filters.to_query(), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch therapy sessions"))?;
        Ok(body.sessions)
    }

    pub async fn get_session(&self, id: Uuid) -> Result<TherapySession, ApiError> {
        let body: SessionBody = self
            .api
            .request(Method::GET, &format!("/therapy/sessions/{}", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch session details"))?;
        Ok(body.session)
    }

    pub async fn therapy_types(&self) -> Result<Vec<TherapyType>, ApiError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct TypesBody {
            therapy_types: Vec<TherapyType>,
        }

        let body: TypesBody = self
            .api
            .request(Method::GET, "/therapy/types", None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch therapy types"))?;
        Ok(body.therapy_types)
    }

    pub async fn book(&self, request: &TherapyBookingRequest) -> Result<TherapySession, ApiError> {
        debug!("Booking therapy session {}", request.therapy_type_id);
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: SessionBody = self
            .api
            .request(Method::POST, "/therapy/sessions", Some(body))
            .await
            .map_err(|e| e.with_fallback("Failed to book therapy session"))?;
        Ok(body.session)
    }

    pub async fn cancel(&self, id: Uuid) -> Result<(), ApiError> {
        self.api
            .execute(Method::PUT, &format!("/therapy/sessions/{}/cancel", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to cancel therapy session"))
    }

    pub async fn reschedule(
        &self,
        id: Uuid,
        new_date: NaiveDate,
        new_time: NaiveTime,
    ) -> Result<TherapySession, ApiError> {
        let body: SessionBody = self
            .api
            .request(
                Method::PUT,
                &format!("/therapy/sessions/{}/reschedule", id),
                Some(json!({ "newDate": new_date, "newTime": new_time })),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to reschedule therapy session"))?;
        Ok(body.session)
    }

    pub async fn submit_feedback(&self, feedback: &SessionFeedback) -> Result<SessionFeedback, ApiError> {
        #[derive(Deserialize)]
        struct FeedbackBody {
            feedback: SessionFeedback,
        }

        let body = serde_json::to_value(feedback)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: FeedbackBody = self
            .api
            .request(Method::POST, "/therapy/feedback", Some(body))
            .await
            .map_err(|e| e.with_fallback("Failed to submit feedback"))?;
        Ok(body.feedback)
    }

    /// `None` when the patient has not submitted feedback yet.
    pub async fn get_feedback(&self, session_id: Uuid) -> Result<Option<SessionFeedback>, ApiError> {
        #[derive(Deserialize)]
        struct FeedbackBody {
            feedback: Option<SessionFeedback>,
        }

        let body: FeedbackBody = self
            .api
            .request(
                Method::GET,
                &format!("/therapy/sessions/{}/feedback", session_id),
                None,
            )
            .await
            .map_err(|e| e.with_fallback("Failed to fetch feedback"))?;
        Ok(body.feedback)
    }

    pub async fn available_slots(
        &self,
        therapy_type_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<String>, ApiError> {
        #[derive(Deserialize)]
        struct SlotsBody {
            slots: Vec<String>,
        }

        let query = vec![
            ("therapyTypeId", therapy_type_id.to_string()),
            ("date", date.to_string()),
        ];
        let body: SlotsBody = self
            .api
            .request_with_query(Method::GET, "/therapy/slots", &query, None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch available slots"))?;
        Ok(body.slots)
    }

    pub async fn update_notes(&self, id: Uuid, notes: &str) -> Result<TherapySession, ApiError> {
        let body: SessionBody = self
            .api
            .request(
                Method::PUT,
                &format!("/therapy/sessions/{}/notes", id),
                Some(json!({ "notes": notes })),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to update session notes"))?;
        Ok(body.session)
    }
}
