use chrono::Utc;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::{User, UserRole};

pub struct TestConfig {
    pub api_base_url: String,
    pub realtime_url: String,
    pub ai_planner_url: String,
    pub storage_path: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            realtime_url: "ws://localhost:3000/ws".to_string(),
            ai_planner_url: "http://localhost:8000".to_string(),
            storage_path: "local_store.json".to_string(),
        }
    }
}

impl TestConfig {
    /// Point the API base at a mock server (wiremock) uri.
    pub fn with_api_base(uri: &str) -> Self {
        Self {
            api_base_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            realtime_url: self.realtime_url.clone(),
            ai_planner_url: self.ai_planner_url.clone(),
            storage_path: self.storage_path.clone(),
        }
    }
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
            role: UserRole::Patient,
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: email.split('@').next().unwrap_or("user").to_string(),
            role,
        }
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, UserRole::Doctor)
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, UserRole::Patient)
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            avatar: None,
            phone: None,
            date_of_birth: None,
            gender: None,
            address: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
