//! Long-polling loop turning `/start` commands into greeter events.

use std::time::Duration;

use chatrelay_core::greeter::Greeter;
use chatrelay_core::telegram::{BotTransport, StartEvent};
use tracing::{info, warn};

use super::client::{BotApiClient, Update};

const POLL_TIMEOUT_SECS: u64 = 30;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// True for `/start` and `/start@botname`, with or without arguments.
fn is_start_command(text: &str) -> bool {
    match text.split_whitespace().next() {
        Some(first) => first == "/start" || first.starts_with("/start@"),
        None => false,
    }
}

fn start_event(update: &Update) -> Option<StartEvent> {
    let message = update.message.as_ref()?;
    let text = message.text.as_deref()?;
    if !is_start_command(text) {
        return None;
    }
    let from = message.from.as_ref();
    Some(StartEvent {
        chat_id: message.chat.id,
        first_name: from.and_then(|u| u.first_name.clone()),
        last_name: from.and_then(|u| u.last_name.clone()),
        username: from.and_then(|u| u.username.clone()),
    })
}

/// Poll the Bot API for updates and greet every `/start`.
///
/// Runs until the task is dropped. Poll failures are logged and retried
/// after a short delay; they never terminate the loop.
pub async fn run_start_loop<T: BotTransport>(bot: &BotApiClient, greeter: &Greeter<T>) {
    match bot.get_me().await {
        Ok(identity) => {
            info!(bot = identity.username.as_deref().unwrap_or("?"), "bot polling started")
        }
        Err(err) => warn!(error = %err, "getMe failed, polling anyway"),
    }

    let mut offset = 0i64;
    loop {
        let updates = match bot.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(err) => {
                warn!(error = %err, "getUpdates failed, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
        };

        for update in &updates {
            offset = offset.max(update.update_id + 1);
            if let Some(event) = start_event(update) {
                greeter.handle_start(event).await;
            }
        }
    }
}
