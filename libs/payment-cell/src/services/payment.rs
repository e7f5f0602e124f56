use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{
    PaymentHistoryPage, PaymentOrder, PaymentQuery, PaymentRecord, VerifyPaymentRequest,
};

#[derive(Deserialize)]
struct PaymentBody {
    payment: PaymentRecord,
}

pub struct PaymentService {
    api: ApiClient,
}

impl PaymentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create_order(&self, appointment_id: Uuid, amount: f64) -> Result<PaymentOrder, ApiError> {
        debug!("Creating payment order for appointment {}", appointment_id);

        #[derive(Deserialize)]
        struct OrderBody {
            order: PaymentOrder,
        }

        let body: OrderBody = self
            .api
            .request(
                Method::POST,
                "/payments/order",
                Some(json!({ "appointmentId": appointment_id, "amount": amount })),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to create payment order"))?;
        Ok(body.order)
    }

    pub async fn verify(&self, request: &VerifyPaymentRequest) -> Result<PaymentRecord, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: PaymentBody = self
            .api
            .request(Method::POST, "/payments/verify", Some(body))
            .await
            .map_err(|e| e.with_fallback("Payment verification failed"))?;
        Ok(body.payment)
    }

    pub async fn history(&self, query: &PaymentQuery) -> Result<PaymentHistoryPage, ApiError> {
        self.api
            .request_with_query(Method::GET, "/payments", &query.to_query(), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch payment history"))
    }

    pub async fn stats(&self) -> Result<Value, ApiError> {
        self.api
            .request(Method::GET, "/payments/stats", None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch payment statistics"))
    }

    pub async fn refund(&self, appointment_id: Uuid, reason: &str) -> Result<PaymentRecord, ApiError> {
        let body: PaymentBody = self
            .api
            .request(
                Method::POST,
                "/payments/refund",
                Some(json!({ "appointmentId": appointment_id, "reason": reason })),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to refund payment"))?;
        Ok(body.payment)
    }
}
