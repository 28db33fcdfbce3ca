//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the remote transcription service and its
//! transcript storage.

pub mod config;
pub mod fetch;
pub mod transcription;

// Re-export adapters
pub use config::GatewayConfig;
pub use fetch::HttpTranscriptFetcher;
pub use transcription::{Credentials, TranscribeApiClient};
