//! Transcription service port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{JobName, TranscriptionJob};

/// Remote transcription service errors
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("Transcription service request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse transcription service response: {0}")]
    ParseError(String),

    #[error("Transcription service error ({kind}): {message}")]
    Remote { kind: String, message: String },
}

/// Parameters for starting a new transcription job.
#[derive(Debug, Clone)]
pub struct StartJob {
    /// Name under which the remote service tracks the job.
    pub name: JobName,
    /// Location of the input media.
    pub media_uri: String,
    /// Bucket the service writes the transcript into.
    pub output_bucket: String,
    /// Object key for the transcript within the output bucket.
    pub output_key: String,
    /// Ask the service to detect the spoken language.
    pub identify_language: bool,
}

/// Port for the managed transcription service
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    /// Query the status of a transcription job.
    ///
    /// # Returns
    /// The job record, or `None` if the service has no job under that
    /// name. Any other failure is an error.
    async fn get_job(&self, name: &JobName) -> Result<Option<TranscriptionJob>, ServiceError>;

    /// Start a new transcription job.
    ///
    /// # Returns
    /// The freshly created job record.
    async fn start_job(&self, request: StartJob) -> Result<TranscriptionJob, ServiceError>;
}

/// Blanket implementation for boxed service types
#[async_trait]
impl TranscriptionService for Box<dyn TranscriptionService> {
    async fn get_job(&self, name: &JobName) -> Result<Option<TranscriptionJob>, ServiceError> {
        self.as_ref().get_job(name).await
    }

    async fn start_job(&self, request: StartJob) -> Result<TranscriptionJob, ServiceError> {
        self.as_ref().start_job(request).await
    }
}
