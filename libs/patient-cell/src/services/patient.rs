use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{MedicalHistoryEntry, MedicalRecord, Patient, PatientPage, PatientQuery};

#[derive(Deserialize)]
struct PatientBody {
    patient: Patient,
}

pub struct PatientService {
    api: ApiClient,
}

impl PatientService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &PatientQuery) -> Result<PatientPage, ApiError> {
        self.api
            .request_with_query(Method::GET, "/patients", &query.to_query(), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch patients"))
    }

    pub async fn get(&self, id: Uuid) -> Result<Patient, ApiError> {
        let body: PatientBody = self
            .api
            .request(Method::GET, &format!("/patients/{}", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch patient"))?;
        Ok(body.patient)
    }

    pub async fn update(&self, id: Uuid, update: Value) -> Result<Patient, ApiError> {
        let body: PatientBody = self
            .api
            .request(Method::PUT, &format!("/patients/{}", id), Some(update))
            .await
            .map_err(|e| e.with_fallback("Failed to update patient"))?;
        Ok(body.patient)
    }

    pub async fn medical_history(&self, id: Uuid) -> Result<Vec<MedicalRecord>, ApiError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct HistoryBody {
            medical_history: Vec<MedicalRecord>,
        }

        let body: HistoryBody = self
            .api
            .request(Method::GET, &format!("/patients/{}/medical-history", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch medical history"))?;
        Ok(body.medical_history)
    }

    pub async fn add_medical_history(
        &self,
        id: Uuid,
        entry: &MedicalHistoryEntry,
    ) -> Result<Patient, ApiError> {
        let body = serde_json::to_value(entry)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: PatientBody = self
            .api
            .request(
                Method::POST,
                &format!("/patients/{}/medical-history", id),
                Some(body),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to add medical history"))?;
        Ok(body.patient)
    }

    pub async fn treatments(&self, id: Uuid) -> Result<Value, ApiError> {
        self.api
            .request(Method::GET, &format!("/patients/{}/treatments", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch patient treatments"))
    }

    pub async fn appointments(&self, id: Uuid) -> Result<Value, ApiError> {
        self.api
            .request(Method::GET, &format!("/patients/{}/appointments", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch patient appointments"))
    }
}
