//! SQLite-backed persistence.

pub mod credential;
pub mod pool;
