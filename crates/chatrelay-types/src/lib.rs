//! Shared domain types for chatrelay.
//!
//! This crate contains the types used across the relay: credential records,
//! conversation and message projections, Telegram-facing data shapes, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod credential;
pub mod conversation;
pub mod error;
pub mod message;
pub mod telegram;
