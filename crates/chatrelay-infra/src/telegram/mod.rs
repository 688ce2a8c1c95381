//! grammers-backed implementation of the Telegram gateway port.
//!
//! The original sin this module exists to avoid: one shared mutable client
//! whose active session races across concurrent requests. Here every phone
//! number gets its own connected client, held in [`pool::ClientPool`].

mod challenge;
pub mod gateway;
pub mod pool;

pub use gateway::GrammersGateway;
pub use pool::ClientPool;
