use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_api::ApiClient;
use shared_models::auth::User;
use shared_models::ApiError;

use crate::models::{AuthPayload, LoginRequest, RegisterRequest, UpdateProfileRequest, UserBody};

pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        debug!("Logging in {}", request.email);
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.api
            .request(Method::POST, "/auth/login", Some(body))
            .await
            .map_err(|e| e.with_fallback("Login failed"))
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        debug!("Registering {} as {}", request.email, request.role);
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.api
            .request(Method::POST, "/auth/register", Some(body))
            .await
            .map_err(|e| e.with_fallback("Registration failed"))
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.api
            .execute(Method::POST, "/auth/logout", None)
            .await
            .map_err(|e| e.with_fallback("Logout failed"))
    }

    pub async fn get_profile(&self) -> Result<User, ApiError> {
        let body: UserBody = self
            .api
            .request(Method::GET, "/auth/profile", None)
            .await
            .map_err(|e| e.with_fallback("Failed to fetch profile"))?;
        Ok(body.user)
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let body: UserBody = self
            .api
            .request(Method::PUT, "/auth/profile", Some(body))
            .await
            .map_err(|e| e.with_fallback("Failed to update profile"))?;
        Ok(body.user)
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<(), ApiError> {
        self.api
            .execute(
                Method::PUT,
                "/auth/change-password",
                Some(json!({ "currentPassword": current, "newPassword": new })),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to change password"))
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.api
            .execute(
                Method::POST,
                "/auth/forgot-password",
                Some(json!({ "email": email })),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to request password reset"))
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        self.api
            .execute(
                Method::POST,
                "/auth/reset-password",
                Some(json!({ "token": token, "newPassword": new_password })),
            )
            .await
            .map_err(|e| e.with_fallback("Failed to reset password"))
    }
}
