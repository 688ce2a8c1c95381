//! Environment-driven configuration for the relay.
//!
//! The MTProto credentials (`TG_API_ID`, `TG_API_HASH`) are required; the
//! bot side (`BOT_TOKEN`, `WEB_APP_URL`) is optional -- without a token the
//! greeter simply stays disabled.

use std::path::PathBuf;

use anyhow::Context;
use secrecy::SecretString;

/// Configuration for the Telegram collaborators and local storage.
pub struct RelayConfig {
    /// Telegram application id (from my.telegram.org).
    pub api_id: i32,
    /// Telegram application hash.
    pub api_hash: String,
    /// Bot API token for the greeter. Never logged.
    pub bot_token: Option<SecretString>,
    /// Web-app URL the greeting's login button opens.
    pub web_app_url: Option<String>,
}

impl RelayConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_id = std::env::var("TG_API_ID")
            .context("TG_API_ID is not set")
            .and_then(|raw| parse_api_id(&raw))?;
        let api_hash = std::env::var("TG_API_HASH").context("TG_API_HASH is not set")?;

        let bot_token = std::env::var("BOT_TOKEN").ok().map(SecretString::from);
        let web_app_url = std::env::var("WEB_APP_URL").ok();

        Ok(Self {
            api_id,
            api_hash,
            bot_token,
            web_app_url,
        })
    }
}

fn parse_api_id(raw: &str) -> anyhow::Result<i32> {
    raw.trim()
        .parse::<i32>()
        .with_context(|| format!("TG_API_ID must be an integer, got '{raw}'"))
}

/// Resolve the data directory: `CHATRELAY_DATA_DIR`, else `~/.chatrelay`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("CHATRELAY_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".chatrelay")
        }
    }
}
