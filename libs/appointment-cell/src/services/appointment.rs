use chrono::{NaiveDate, NaiveTime};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{
    Appointment, AppointmentPage, AppointmentQuery, CompleteAppointmentRequest,
    CreateAppointmentRequest, UpdateAppointmentRequest,
};

#[derive(Deserialize)]
struct AppointmentBody {
    appointment: Appointment,
}

/// REST client for the appointment resource. Status changes are
/// distinct server operations (cancel, reschedule, complete), never a
/// generic field update.
pub struct AppointmentService {
    api: ApiClient,
}

impl AppointmentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create(&self, request: &CreateAppointmentRequest) -> Result<Appointment, ApiError> {
        debug!("Booking appointment with doctor {}", request.doctor);
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: AppointmentBody = self
            .api
            .request(Method::POST, "/appointments", Some(body))
            .await
            .map_err(|e| e.with_fallback("Failed to create appointment"))?;
        Ok(body.appointment)
    }

    pub async fn list(&self, query: &AppointmentQuery) -> Result<AppointmentPage, ApiError> {
        self.api
            .request_with_query(Method::GET, "/appointments", &query.to_query(), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch appointments"))
    }

    pub async fn get(&self, id: Uuid) -> Result<Appointment, ApiError> {
        let body: AppointmentBody = self
            .api
            .request(Method::GET, &format!("/appointments/{}", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch appointment"))?;
        Ok(body.appointment)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateAppointmentRequest) -> Result<Appointment, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: AppointmentBody = self
            .api
            .request(Method::PUT, &format!("/appointments/{}", id), Some(body))
            .await
            .map_err(|e| e.with_fallback("Failed to update appointment"))?;
        Ok(body.appointment)
    }

    pub async fn cancel(&self, id: Uuid, reason: &str) -> Result<Appointment, ApiError> {
        debug!("Cancelling appointment {}", id);
        let body: AppointmentBody = self
            .api
            .request(
                Method::PUT,
                &format!("/appointments/{}/cancel", id),
                Some(json!({ "reason": reason })),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to cancel appointment"))?;
        Ok(body.appointment)
    }

    pub async fn reschedule(
        &self,
        id: Uuid,
        new_date: NaiveDate,
        new_time: NaiveTime,
    ) -> Result<Appointment, ApiError> {
        debug!("Rescheduling appointment {} to {} {}", id, new_date, new_time);
        let body: AppointmentBody = self
            .api
            .request(
                Method::PUT,
                &format!("/appointments/{}/reschedule", id),
                Some(json!({
                    "newDate": new_date,
                    "newTime": new_time,
                })),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to reschedule appointment"))?;
        Ok(body.appointment)
    }

    pub async fn complete(
        &self,
        id: Uuid,
        consultation: &CompleteAppointmentRequest,
    ) -> Result<Appointment, ApiError> {
        let body = serde_json::to_value(consultation)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: AppointmentBody = self
            .api
            .request(Method::PUT, &format!("/appointments/{}/complete", id), Some(body))
            .await
            .map_err(|e| e.with_fallback("Failed to complete appointment"))?;
        Ok(body.appointment)
    }

    pub async fn stats(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Value, ApiError> {
        let mut query = Vec::new();
        if let Some(start_date) = start_date {
            query.push(("startDate", start_date.to_string()));
        }
        if let Some(end_date) = end_date {
            query.push(("endDate", end_date.to_string()));
        }
        self.api
            .request_with_query(Method::GET, "/appointments/stats", &query, None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch appointment statistics"))
    }
}
