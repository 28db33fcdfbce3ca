//! Server layer - HTTP delivery
//!
//! Exposes the orchestrator through a single axum endpoint.

pub mod routes;

pub use routes::{router, AppState, Orchestrator};
