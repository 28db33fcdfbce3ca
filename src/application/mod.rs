//! Application layer - Use cases and port interfaces
//!
//! Contains the core orchestration logic and trait definitions
//! for external system interactions.

pub mod orchestrate;
pub mod ports;

// Re-export use cases
pub use orchestrate::{JobStorage, OrchestrationError, TranscribeJobUseCase};
