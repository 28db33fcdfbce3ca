//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod fetcher;
pub mod transcription;

// Re-export common types
pub use fetcher::{FetchError, TranscriptFetcher};
pub use transcription::{ServiceError, StartJob, TranscriptionService};
