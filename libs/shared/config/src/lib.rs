use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub realtime_url: String,
    pub ai_planner_url: String,
    pub storage_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("AYURSUTRA_API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("AYURSUTRA_API_BASE_URL not set, using default");
                    "http://localhost:3000/api".to_string()
                }),
            realtime_url: env::var("AYURSUTRA_REALTIME_URL")
                .unwrap_or_else(|_| {
                    warn!("AYURSUTRA_REALTIME_URL not set, using default");
                    "ws://localhost:3000/ws".to_string()
                }),
            ai_planner_url: env::var("AYURSUTRA_AI_PLANNER_URL")
                .unwrap_or_else(|_| {
                    warn!("AYURSUTRA_AI_PLANNER_URL not set, using default");
                    "http://localhost:8000".to_string()
                }),
            storage_path: env::var("AYURSUTRA_STORAGE_PATH")
                .unwrap_or_else(|_| {
                    warn!("AYURSUTRA_STORAGE_PATH not set, using default");
                    ".ayursutra/local_store.json".to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
            && !self.realtime_url.is_empty()
            && !self.storage_path.is_empty()
    }

    pub fn is_planner_configured(&self) -> bool {
        !self.ai_planner_url.is_empty()
    }
}
