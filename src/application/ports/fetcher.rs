//! Transcript retrieval port interface

use async_trait::async_trait;
use thiserror::Error;

/// Transcript retrieval errors
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Failed to fetch transcript: {0}")]
    RequestFailed(String),

    #[error("Transcript fetch returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Transcript body is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Port for retrieving a finished transcript document
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the transcript JSON from the location the transcription
    /// service reported for a completed job.
    ///
    /// The document is treated as opaque and passed through unmodified.
    async fn fetch(&self, uri: &str) -> Result<serde_json::Value, FetchError>;
}

/// Blanket implementation for boxed fetcher types
#[async_trait]
impl TranscriptFetcher for Box<dyn TranscriptFetcher> {
    async fn fetch(&self, uri: &str) -> Result<serde_json::Value, FetchError> {
        self.as_ref().fetch(uri).await
    }
}
