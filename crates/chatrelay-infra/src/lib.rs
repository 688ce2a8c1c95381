//! Infrastructure layer for chatrelay.
//!
//! Contains implementations of the port traits defined in `chatrelay-core`:
//! SQLite credential storage, the grammers-backed Telegram gateway with its
//! per-phone client pool, and the Bot API greeting transport.

pub mod bot;
pub mod config;
pub mod sqlite;
pub mod telegram;
