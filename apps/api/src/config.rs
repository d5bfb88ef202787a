use anyhow::{bail, Context, Result};
use chrono::FixedOffset;

use crate::screening::decision::DecisionPolicy;

/// Application configuration loaded from environment variables.
/// Every credential the workflow needs is validated here, before the server
/// starts — a missing value must never surface mid-evaluation.
#[derive(Debug, Clone)]
pub struct Config {
    pub zoom_account_id: String,
    pub zoom_client_id: String,
    pub zoom_client_secret: String,
    /// Base URL of the conferencing OAuth endpoint. Overridable for tests
    /// and self-hosted gateways.
    pub zoom_oauth_base: String,
    pub zoom_api_base: String,
    pub smtp_host: String,
    pub sender_email: String,
    pub email_app_password: String,
    pub company_name: String,
    pub decision_policy: DecisionPolicy,
    /// The offset interview slot times are expressed in. Slots are converted
    /// from this offset to UTC before being sent to the conferencing provider.
    pub interview_tz_offset: FixedOffset,
    pub role_catalog_path: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let decision_mode =
            std::env::var("DECISION_MODE").unwrap_or_else(|_| "membership".to_string());
        let decision_threshold = std::env::var("DECISION_THRESHOLD")
            .unwrap_or_else(|_| "0.5".to_string())
            .parse::<f64>()
            .context("DECISION_THRESHOLD must be a number in [0,1]")?;
        let decision_policy = DecisionPolicy::from_config(&decision_mode, decision_threshold)?;

        let tz = std::env::var("INTERVIEW_TZ_OFFSET").unwrap_or_else(|_| "+00:00".to_string());
        let interview_tz_offset = tz
            .parse::<FixedOffset>()
            .with_context(|| format!("INTERVIEW_TZ_OFFSET '{tz}' is not a valid UTC offset"))?;

        let config = Config {
            zoom_account_id: require_env("ZOOM_ACCOUNT_ID")?,
            zoom_client_id: require_env("ZOOM_CLIENT_ID")?,
            zoom_client_secret: require_env("ZOOM_CLIENT_SECRET")?,
            zoom_oauth_base: std::env::var("ZOOM_OAUTH_BASE")
                .unwrap_or_else(|_| "https://zoom.us".to_string()),
            zoom_api_base: std::env::var("ZOOM_API_BASE")
                .unwrap_or_else(|_| "https://api.zoom.us/v2".to_string()),
            smtp_host: std::env::var("SMTP_HOST")
                .unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            sender_email: require_env("SENDER_EMAIL")?,
            email_app_password: require_env("EMAIL_APP_PASSWORD")?,
            company_name: require_env("COMPANY_NAME")?,
            decision_policy,
            interview_tz_offset,
            role_catalog_path: std::env::var("ROLE_CATALOG_PATH").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        if config.company_name.trim().is_empty() {
            bail!("COMPANY_NAME must not be empty");
        }

        Ok(config)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
