//! BotTransport trait and the `/start` event it reacts to.

use chatrelay_types::error::GatewayError;

/// A `/start` command received by the chat bot.
#[derive(Debug, Clone)]
pub struct StartEvent {
    /// Chat to reply into.
    pub chat_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl StartEvent {
    /// Name used to address the user in the greeting: first name, else last
    /// name, else username, else a friendly fallback.
    pub fn greeting_name(&self) -> String {
        self.first_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.last_name.as_deref().filter(|s| !s.is_empty()))
            .or(self.username.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("My friend")
            .to_string()
    }
}

/// Trait for the bot-side message send (implemented over the Bot API in
/// chatrelay-infra). The transport attaches the login button; the greeter
/// only supplies chat and text.
pub trait BotTransport: Send + Sync + 'static {
    fn send_greeting(
        &self,
        chat_id: i64,
        text: String,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_name_chain() {
        let mut event = StartEvent {
            chat_id: 1,
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            username: Some("ada".to_string()),
        };
        assert_eq!(event.greeting_name(), "Ada");

        event.first_name = None;
        assert_eq!(event.greeting_name(), "Lovelace");

        event.last_name = None;
        assert_eq!(event.greeting_name(), "ada");

        event.username = None;
        assert_eq!(event.greeting_name(), "My friend");
    }
}
