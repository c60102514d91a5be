use anyhow::{Context, Result};

use crate::listing::pipeline::RepairFailurePolicy;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    /// Beta access password. `None` disables the gate.
    pub app_password: Option<String>,
    pub repair_failure_policy: RepairFailurePolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let repair_failure_policy = match std::env::var("REPAIR_FAILURE_POLICY") {
            Ok(raw) => raw
                .parse::<RepairFailurePolicy>()
                .map_err(anyhow::Error::msg)
                .context("REPAIR_FAILURE_POLICY must be 'abort' or 'leave_empty'")?,
            Err(_) => RepairFailurePolicy::default(),
        };

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            app_password: std::env::var("APP_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
            repair_failure_policy,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
