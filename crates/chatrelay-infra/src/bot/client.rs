//! HTTP client for the Telegram Bot API.

use chatrelay_core::telegram::BotTransport;
use chatrelay_types::error::GatewayError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Envelope every Bot API method returns.
#[derive(Debug, Deserialize)]
pub struct ApiResult<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// The bot's own identity, from `getMe`.
#[derive(Debug, Deserialize)]
pub struct BotIdentity {
    pub id: i64,
    pub username: Option<String>,
}

/// One entry from `getUpdates`.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub text: Option<String>,
    pub chat: ChatRef,
    pub from: Option<UserRef>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRef {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserRef {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

/// Client for the Bot API. The token is secret and never appears in logs;
/// it is only interpolated into request URLs.
pub struct BotApiClient {
    http: reqwest::Client,
    token: SecretString,
    base_url: String,
    web_app_url: Option<String>,
}

impl BotApiClient {
    pub fn new(token: SecretString, web_app_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            web_app_url,
        }
    }

    fn url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.base_url,
            self.token.expose_secret()
        )
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T, GatewayError> {
        let response = self
            .http
            .post(self.url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Connect(e.to_string()))?;

        let envelope: ApiResult<T> = response
            .json()
            .await
            .map_err(|e| GatewayError::Rpc(format!("{method}: malformed response: {e}")))?;

        if !envelope.ok {
            let reason = envelope.description.unwrap_or_else(|| "unknown".to_string());
            return Err(GatewayError::Rpc(format!("{method}: {reason}")));
        }
        envelope
            .result
            .ok_or_else(|| GatewayError::Rpc(format!("{method}: ok response without result")))
    }

    /// Verify the token and learn the bot's username.
    pub async fn get_me(&self) -> Result<BotIdentity, GatewayError> {
        self.call("getMe", json!({})).await
    }

    /// Long-poll for updates after `offset`.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, GatewayError> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }
}

/// `sendMessage` body for a greeting: Markdown text plus, when a web-app URL
/// is configured, the inline login button.
pub(crate) fn greeting_payload(
    chat_id: i64,
    text: &str,
    web_app_url: Option<&str>,
) -> serde_json::Value {
    let mut payload = json!({
        "chat_id": chat_id,
        "text": text,
        "parse_mode": "Markdown",
    });
    if let Some(url) = web_app_url {
        payload["reply_markup"] = json!({
            "inline_keyboard": [[{
                "text": "Click to login",
                "web_app": { "url": url },
            }]],
        });
    }
    payload
}

impl BotTransport for BotApiClient {
    async fn send_greeting(&self, chat_id: i64, text: String) -> Result<(), GatewayError> {
        let payload = greeting_payload(chat_id, &text, self.web_app_url.as_deref());
        // sendMessage echoes the sent message back; we only care that it
        // succeeded.
        let _sent: serde_json::Value = self.call("sendMessage", payload).await?;
        debug!(chat_id, "greeting delivered");
        Ok(())
    }
}
