use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_api_url: String,
    pub backend_api_key: String,
    pub session_file: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            backend_api_url: env::var("CATTLE_HEALTH_API_URL")
                .unwrap_or_else(|_| {
                    warn!("CATTLE_HEALTH_API_URL not set, using empty value");
                    String::new()
                }),
            backend_api_key: env::var("CATTLE_HEALTH_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("CATTLE_HEALTH_API_KEY not set, using empty value");
                    String::new()
                }),
            session_file: env::var("SESSION_FILE").ok(),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.backend_api_url.is_empty()
    }
}
