//! Business logic and port trait definitions for chatrelay.
//!
//! This crate defines the "ports" (repository and gateway traits) that the
//! infrastructure layer implements. It depends only on `chatrelay-types` --
//! never on `chatrelay-infra` or any database/network crate.

pub mod auth;
pub mod chats;
pub mod greeter;
pub mod repository;
pub mod session;
pub mod telegram;

#[cfg(test)]
pub(crate) mod testing;
