use reqwest::Method;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use shared_api::ApiClient;
use shared_models::ApiError;

use crate::models::{Notification, NotificationPage, NotificationQuery};

/// Single-entity endpoints wrap the payload one level deeper.
#[derive(Deserialize)]
struct NotificationBody {
    notification: Notification,
}

pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &NotificationQuery) -> Result<NotificationPage, ApiError> {
        self.api
            .request_with_query(Method::GET, "/notifications", &query.to_query(), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch notifications"))
    }

    pub async fn get(&self, id: Uuid) -> Result<Notification, ApiError> {
        let body: NotificationBody = self
            .api
            .request(Method::GET, &format!("/notifications/{}", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch notification"))?;
        Ok(body.notification)
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<Notification, ApiError> {
        debug!("Marking notification {} as read", id);
        let body: NotificationBody = self
            .api
            .request(Method::PUT, &format!("/notifications/{}/read", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to mark notification as read"))?;
        Ok(body.notification)
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.api
            .execute(Method::PUT, "/notifications/read-all", None)
            .await
            .map_err(|e| e.with_fallback("Failed to mark all notifications as read"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api
            .execute(Method::DELETE, &format!("/notifications/{}", id), None)
            .await
            .map_err(|e| e.with_fallback("Failed to delete notification"))
    }
}
