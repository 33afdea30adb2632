//! Configuration loading from environment.

use std::{env, time::Duration};

use transfer_provider::DEFAULT_BASE_URL;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub api_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout: Duration,
    /// Public URL the provider posts webhooks to.
    pub callback_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let api_url = env::var("TRANSFER_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let api_key = required("TRANSFER_API_KEY")?;
        let api_secret = required("TRANSFER_API_SECRET")?;
        let callback_url = required("WEBHOOK_CALLBACK_URL")?;

        let timeout_secs: u64 = env::var("TRANSFER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?;

        Ok(Self {
            port,
            api_url,
            api_key,
            api_secret,
            timeout: Duration::from_secs(timeout_secs),
            callback_url,
        })
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable is required", name))
}
