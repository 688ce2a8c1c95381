//! HTTP server library for chatrelay.
//!
//! The binary in `main.rs` wires configuration and the bot polling loop
//! around [`state::AppState`] and [`http::router::build_router`]; the
//! library exists so integration tests can drive the real router with a
//! scripted gateway.

pub mod http;
pub mod state;
