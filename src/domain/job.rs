//! Transcription job value objects

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error when a job name fails validation
#[derive(Debug, Clone, Error)]
#[error("Invalid job name: \"{input}\". Job names must be non-empty")]
pub struct InvalidJobNameError {
    pub input: String,
}

/// Name identifying a transcription job on the remote service.
///
/// Derived from the media filename, so repeated requests for the same
/// file address the same remote job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobName(String);

impl JobName {
    /// Create a job name, rejecting empty or whitespace-only input.
    pub fn new(input: impl Into<String>) -> Result<Self, InvalidJobNameError> {
        let input = input.into();
        if input.trim().is_empty() {
            return Err(InvalidJobNameError { input });
        }
        Ok(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Job status as reported by the remote service.
///
/// A missing job is not a status; status queries report it as the
/// absence of a job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
}

impl JobStatus {
    /// Whether the job is still being worked on by the remote service.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Queued | Self::InProgress)
    }

    /// Whether the job has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Queued => "QUEUED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// A transcription job record as observed from the remote service.
///
/// The transcript URI is only present once the job has completed; the
/// failure reason only once it has failed.
#[derive(Debug, Clone)]
pub struct TranscriptionJob {
    pub name: JobName,
    pub status: JobStatus,
    pub transcript_uri: Option<String>,
    pub failure_reason: Option<String>,
}

impl TranscriptionJob {
    pub fn new(name: JobName, status: JobStatus) -> Self {
        Self {
            name,
            status,
            transcript_uri: None,
            failure_reason: None,
        }
    }

    pub fn with_transcript_uri(mut self, uri: impl Into<String>) -> Self {
        self.transcript_uri = Some(uri.into());
        self
    }

    pub fn with_failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.failure_reason = Some(reason.into());
        self
    }
}
