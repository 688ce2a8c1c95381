//! Repository trait definitions (ports implemented by chatrelay-infra).

pub mod credential;
