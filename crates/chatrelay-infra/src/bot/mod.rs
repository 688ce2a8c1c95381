//! Telegram Bot API client for the greeter.
//!
//! The bot side speaks plain HTTPS to `api.telegram.org`, independent of the
//! MTProto gateway. It does exactly two things: long-poll for `/start`
//! commands and send the greeting with its login button.

pub mod client;
pub mod poll;

pub use client::BotApiClient;
pub use poll::run_start_loop;
