use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{Doctor, DoctorPage, DoctorQuery, DoctorSchedule, UpdateDoctorRequest};

#[derive(Deserialize)]
struct DoctorBody {
    doctor: Doctor,
}

pub struct DoctorService {
    api: ApiClient,
}

impl DoctorService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &DoctorQuery) -> Result<DoctorPage, ApiError> {
        self.api
            .request_with_query(Method::GET, "/doctors", &query.to_query(), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch doctors"))
    }

    pub async fn get(&self, id: Uuid) -> Result<Doctor, ApiError> {
        let body: DoctorBody = self
            .api
            .request(Method::GET, &format!("/doctors/{}", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch doctor"))?;
        Ok(body.doctor)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateDoctorRequest) -> Result<Doctor, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: DoctorBody = self
            .api
            .request(Method::PUT, &format!("/doctors/{}", id), Some(body))
            .await
            .map_err(|e| e.with_fallback("Failed to update doctor"))?;
        Ok(body.doctor)
    }

    pub async fn availability(&self, id: Uuid) -> Result<DoctorSchedule, ApiError> {
        #[derive(Deserialize)]
        struct AvailabilityBody {
            availability: DoctorSchedule,
        }

        let body: AvailabilityBody = self
            .api
            .request(Method::GET, &format!("/doctors/{}/availability", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch doctor availability"))?;
        Ok(body.availability)
    }

    pub async fn update_availability(
        &self,
        id: Uuid,
        availability: &DoctorSchedule,
        consultation_fee: Option<f64>,
    ) -> Result<Doctor, ApiError> {
        let mut payload = json!({ "availability": availability });
        if let Some(fee) = consultation_fee {
            payload["consultationFee"] = json!(fee);
        }

        let body: DoctorBody = self
            .api
            .request(
                Method::PUT,
                &format!("/doctors/{}/availability", id),
                Some(payload),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to update doctor availability"))?;
        Ok(body.doctor)
    }

    /// The backend returns these two untyped; callers that need the
    /// typed entities go through the patient/appointment cells.
    pub async fn patients(&self, id: Uuid) -> Result<Value, ApiError> {
        self.api
            .request(Method::GET, &format!("/doctors/{}/patients", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch doctor patients"))
    }

    pub async fn appointments(&self, id: Uuid) -> Result<Value, ApiError> {
        self.api
            .request(Method::GET, &format!("/doctors/{}/appointments", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch doctor appointments"))
    }
}
