use reqwest::Client;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::ApiError;

use crate::models::GeneratedPlan;

/// Client for the external AI planner: a local HTTP endpoint that
/// accepts a formatted free-text patient report and answers with a
/// day-by-day schedule. It is an opaque collaborator: no auth
/// header, no envelope, no retry, no timeout.
pub struct PlannerService {
    client: Client,
    base_url: String,
}

impl PlannerService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.ai_planner_url.clone(),
        }
    }

    pub async fn generate(&self, report: &str) -> Result<GeneratedPlan, ApiError> {
        let url = format!("{}/generate", self.base_url);
        debug!("Requesting AI plan generation ({} chars of report)", report.len());

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "message": report }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: "AI planner rejected the report".to_string(),
            });
        }

        response
            .json::<GeneratedPlan>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
