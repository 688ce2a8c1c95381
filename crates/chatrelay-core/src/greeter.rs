//! Bounded-concurrency greeting dispatch for the chat bot.
//!
//! Decouples the greeting send from the `/start` update that triggered it:
//! each greeting runs as a fire-and-forget task, capped at
//! [`MAX_CONCURRENT_SENDS`] in flight. There is no retry policy -- a failed
//! send is logged and dropped.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::telegram::{BotTransport, StartEvent};

/// Upper bound on greetings being sent at once.
pub const MAX_CONCURRENT_SENDS: usize = 30;

/// Dispatches greeting sends through a [`BotTransport`].
pub struct Greeter<T: BotTransport> {
    transport: Arc<T>,
    permits: Arc<Semaphore>,
}

impl<T: BotTransport> Greeter<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            permits: Arc::new(Semaphore::new(MAX_CONCURRENT_SENDS)),
        }
    }

    /// The Markdown greeting text for a user.
    pub fn greeting_text(name: &str) -> String {
        format!(
            "Hello, *{name}*!\u{1F44B}\n\nClick the button below to login and see your chat history\u{1F601}"
        )
    }

    /// Queue a greeting for a `/start` event.
    ///
    /// Waits for a send slot, then spawns the send in the background and
    /// returns. Errors from the transport are logged, never propagated.
    pub async fn handle_start(&self, event: StartEvent) {
        let permit = match self.permits.clone().acquire_owned().await {
            Ok(permit) => permit,
            // Only possible if the semaphore was closed, which never happens.
            Err(_) => return,
        };

        let transport = Arc::clone(&self.transport);
        let text = Self::greeting_text(&event.greeting_name());
        tokio::spawn(async move {
            let _permit = permit;
            match transport.send_greeting(event.chat_id, text).await {
                Ok(()) => debug!(chat_id = event.chat_id, "greeting sent"),
                Err(err) => {
                    warn!(chat_id = event.chat_id, error = %err, "greeting send failed, dropping")
                }
            }
        });
    }
}
