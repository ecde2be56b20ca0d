use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub assistant_model: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            data_path: env::var("DENTAL_DATA_PATH")
                .unwrap_or_else(|_| "dental-data.json".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("OPENAI_API_KEY not set, assistant replies will fall back");
                    String::new()
                }),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            assistant_model: env::var("ASSISTANT_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_assistant_configured() {
            warn!("Assistant not fully configured - missing OPENAI_API_KEY");
        }

        config
    }

    pub fn is_assistant_configured(&self) -> bool {
        !self.openai_api_key.is_empty() && !self.openai_base_url.is_empty()
    }
}
