use reqwest::Method;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{
    DayFeedback, SaveTreatmentPlanRequest, TreatmentPlan, UpdateTreatmentPlanRequest,
};

#[derive(Deserialize)]
struct PlanBody {
    plan: TreatmentPlan,
}

pub struct TreatmentService {
    api: ApiClient,
}

impl TreatmentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn save(&self, request: &SaveTreatmentPlanRequest) -> Result<TreatmentPlan, ApiError> {
        debug!("Saving treatment plan for {}", request.patient_name);
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: PlanBody = self
            .api
            .request(Method::POST, "/treatment-plans", Some(body))
            .await
            .map_err(|e| e.with_fallback("Failed to save treatment plan"))?;
        Ok(body.plan)
    }

    pub async fn list(&self) -> Result<Vec<TreatmentPlan>, ApiError> {
        #[derive(Deserialize)]
        struct PlansBody {
            plans: Vec<TreatmentPlan>,
        }

        let body: PlansBody = self
            .api
            .request(Method::GET, "/treatment-plans", None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch treatment plans"))?;
        Ok(body.plans)
    }

    pub async fn get_by_patient(&self, patient_id: Uuid) -> Result<TreatmentPlan, ApiError> {
        let body: PlanBody = self
            .api
            .request(
                Method::GET,
                &format!("/treatment-plans/patient/{}", patient_id),
                None,
            )
            .await
            .map_err(|e| e.with_fallback("Failed to fetch treatment plan"))?;
        Ok(body.plan)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateTreatmentPlanRequest,
    ) -> Result<TreatmentPlan, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: PlanBody = self
            .api
            .request(Method::PUT, &format!("/treatment-plans/{}", id), Some(body))
            .await
            .map_err(|e| e.with_fallback("Failed to update treatment plan"))?;
        Ok(body.plan)
    }

    /// Append patient feedback to one plan day; the server returns the
    /// whole updated plan.
    pub async fn submit_day_feedback(
        &self,
        id: Uuid,
        day: u32,
        feedback: &DayFeedback,
    ) -> Result<TreatmentPlan, ApiError> {
        let body = serde_json::to_value(feedback)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: PlanBody = self
            .api
            .request(
                Method::POST,
                &format!("/treatment-plans/{}/days/{}/feedback", id, day),
                Some(body),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to submit feedback"))?;
        Ok(body.plan)
    }
}
