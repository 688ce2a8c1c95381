//! Request handlers for the relay endpoints.

pub mod auth;
pub mod chats;
pub mod messages;
