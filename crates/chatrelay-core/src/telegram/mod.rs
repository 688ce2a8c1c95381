//! Port traits for the external Telegram collaborators.
//!
//! The MTProto client and the Bot API are external capabilities: the relay
//! never speaks the wire protocol itself. These traits pin down exactly the
//! surface the relay consumes; implementations live in `chatrelay-infra`.

pub mod bot;
pub mod gateway;

pub use bot::{BotTransport, StartEvent};
pub use gateway::TelegramGateway;
