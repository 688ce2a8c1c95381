//! HTTP layer: the four relay endpoints plus health, served by axum.

pub mod error;
pub mod handlers;
pub mod router;
