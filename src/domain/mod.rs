//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod job;
pub mod poll;

// Re-export common types
pub use job::{InvalidJobNameError, JobName, JobStatus, TranscriptionJob};
pub use poll::PollPolicy;
