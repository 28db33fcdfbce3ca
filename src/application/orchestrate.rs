//! Transcription job orchestration use case
//!
//! Turns the remote service's asynchronous job lifecycle into one
//! synchronous call: ensure a job exists and is progressing, wait for a
//! terminal state, then fetch the transcript of a completed job.

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::{JobName, JobStatus, PollPolicy, TranscriptionJob};

use super::ports::{FetchError, ServiceError, StartJob, TranscriptFetcher, TranscriptionService};

/// Errors from the orchestration use case
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Transcription job \"{name}\" ended as {status}{}", format_reason(.reason))]
    JobFailed {
        name: JobName,
        status: JobStatus,
        reason: Option<String>,
    },

    #[error("Transcription job \"{name}\" did not finish within {}s", .waited.as_secs())]
    Timeout { name: JobName, waited: Duration },

    #[error("Transcription job \"{name}\" disappeared while polling")]
    JobVanished { name: JobName },

    #[error("Transcription job \"{name}\" completed without a transcript location")]
    MissingTranscriptUri { name: JobName },
}

fn format_reason(reason: &Option<String>) -> String {
    match reason {
        Some(r) => format!(": {}", r),
        None => String::new(),
    }
}

/// Storage layout the remote service uses for one job.
///
/// Input media is expected at `s3://<bucket>/<name>`; the transcript is
/// written back to the same bucket under `<name>.transcription`.
#[derive(Debug, Clone)]
pub struct JobStorage {
    pub bucket: String,
}

impl JobStorage {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
        }
    }

    fn media_uri(&self, name: &JobName) -> String {
        format!("s3://{}/{}", self.bucket, name)
    }

    fn output_key(&self, name: &JobName) -> String {
        format!("{}.transcription", name)
    }
}

/// Transcription orchestration use case
pub struct TranscribeJobUseCase<S, F>
where
    S: TranscriptionService,
    F: TranscriptFetcher,
{
    service: S,
    fetcher: F,
    storage: JobStorage,
    policy: PollPolicy,
}

impl<S, F> TranscribeJobUseCase<S, F>
where
    S: TranscriptionService,
    F: TranscriptFetcher,
{
    /// Create a new use case instance
    pub fn new(service: S, fetcher: F, storage: JobStorage, policy: PollPolicy) -> Self {
        Self {
            service,
            fetcher,
            storage,
            policy,
        }
    }

    /// Execute the full workflow for one filename-derived job name.
    ///
    /// # Returns
    /// The transcript JSON of the completed job.
    pub async fn execute(&self, name: &JobName) -> Result<serde_json::Value, OrchestrationError> {
        let job = self.ensure_job_started(name).await?;
        let job = self.await_completion(job).await?;

        match job.status {
            JobStatus::Completed => {
                let uri = job
                    .transcript_uri
                    .ok_or_else(|| OrchestrationError::MissingTranscriptUri {
                        name: name.clone(),
                    })?;
                info!(job = %name, "job completed, fetching transcript");
                Ok(self.fetcher.fetch(&uri).await?)
            }
            status => Err(OrchestrationError::JobFailed {
                name: name.clone(),
                status,
                reason: job.failure_reason,
            }),
        }
    }

    /// Make sure a usable job exists for `name`.
    ///
    /// A missing job and a previously failed job both lead to a fresh
    /// start-job request. The failed job is left in place; the remote
    /// service tracks the restart under the same name.
    async fn ensure_job_started(
        &self,
        name: &JobName,
    ) -> Result<TranscriptionJob, OrchestrationError> {
        match self.service.get_job(name).await? {
            Some(job) if job.status != JobStatus::Failed => {
                debug!(job = %name, status = %job.status, "reusing existing job");
                Ok(job)
            }
            prior => {
                if prior.is_some() {
                    warn!(job = %name, "previous job failed, starting over");
                } else {
                    info!(job = %name, "no existing job, starting one");
                }
                let request = StartJob {
                    name: name.clone(),
                    media_uri: self.storage.media_uri(name),
                    output_bucket: self.storage.bucket.clone(),
                    output_key: self.storage.output_key(name),
                    identify_language: true,
                };
                Ok(self.service.start_job(request).await?)
            }
        }
    }

    /// Poll until the job leaves its pending state.
    ///
    /// Waits `policy.interval` between status queries and gives up with
    /// a timeout once `policy.max_wait` has elapsed.
    async fn await_completion(
        &self,
        mut job: TranscriptionJob,
    ) -> Result<TranscriptionJob, OrchestrationError> {
        let started = Instant::now();

        while job.status.is_pending() {
            let waited = started.elapsed();
            if waited >= self.policy.max_wait {
                return Err(OrchestrationError::Timeout {
                    name: job.name,
                    waited,
                });
            }

            debug!(job = %job.name, status = %job.status, "job pending, waiting");
            tokio::time::sleep(self.policy.interval).await;

            let name = job.name.clone();
            job = self
                .service
                .get_job(&name)
                .await?
                .ok_or(OrchestrationError::JobVanished { name })?;
        }

        Ok(job)
    }
}
