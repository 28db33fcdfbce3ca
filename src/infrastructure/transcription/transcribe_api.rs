//! Managed transcription service adapter
//!
//! Speaks the AWS Transcribe JSON 1.1 target protocol: every call is a
//! signed POST to the service endpoint with an `X-Amz-Target` header
//! naming the operation.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ServiceError, StartJob, TranscriptionService};
use crate::domain::{JobName, JobStatus, TranscriptionJob};

use super::sigv4::{Credentials, RequestSigner};

/// Service name used in the signing scope
const SERVICE_NAME: &str = "transcribe";

/// Wire content type for JSON target calls
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

const TARGET_GET_JOB: &str = "Transcribe.GetTranscriptionJob";
const TARGET_START_JOB: &str = "Transcribe.StartTranscriptionJob";

/// Error type the status call reports for an unknown job name
const NOT_FOUND_KIND: &str = "NotFoundException";

// Request types for the job API

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetTranscriptionJobRequest {
    transcription_job_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct StartTranscriptionJobRequest {
    transcription_job_name: String,
    media: Media,
    output_bucket_name: String,
    output_key: String,
    identify_language: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Media {
    media_file_uri: String,
}

// Response types for the job API

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TranscriptionJobResponse {
    transcription_job: Option<JobRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JobRecord {
    transcription_job_name: String,
    transcription_job_status: JobStatus,
    transcript: Option<TranscriptLocation>,
    failure_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TranscriptLocation {
    transcript_file_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

impl JobRecord {
    fn into_domain(self) -> Result<TranscriptionJob, ServiceError> {
        let name = JobName::new(self.transcription_job_name)
            .map_err(|e| ServiceError::ParseError(e.to_string()))?;
        Ok(TranscriptionJob {
            name,
            status: self.transcription_job_status,
            transcript_uri: self.transcript.and_then(|t| t.transcript_file_uri),
            failure_reason: self.failure_reason,
        })
    }
}

/// Transcription service client
pub struct TranscribeApiClient {
    endpoint: Url,
    signer: RequestSigner,
    client: reqwest::Client,
}

impl TranscribeApiClient {
    /// Create a client for the service's regional endpoint.
    pub fn new(credentials: Credentials, region: impl Into<String>) -> Self {
        let region = region.into();
        let endpoint: Url = format!("https://{}.{}.amazonaws.com", SERVICE_NAME, region)
            .parse()
            .expect("regional endpoint is a valid URL");
        Self::with_endpoint(credentials, region, endpoint)
    }

    /// Create a client against a custom endpoint.
    pub fn with_endpoint(credentials: Credentials, region: impl Into<String>, endpoint: Url) -> Self {
        Self {
            endpoint,
            signer: RequestSigner::new(credentials, region, SERVICE_NAME),
            client: reqwest::Client::new(),
        }
    }

    /// Host header value the signature must cover.
    fn host(&self) -> String {
        let host = self.endpoint.host_str().unwrap_or_default();
        match self.endpoint.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Send one signed target call and return the raw response.
    async fn send_target(&self, target: &str, body: String) -> Result<reqwest::Response, ServiceError> {
        let signature = self.signer.sign(
            "POST",
            &self.host(),
            self.endpoint.path(),
            "",
            &[("content-type", CONTENT_TYPE), ("x-amz-target", target)],
            body.as_bytes(),
            Utc::now(),
        );

        self.client
            .post(self.endpoint.clone())
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", target)
            .header("X-Amz-Date", signature.amz_date)
            .header("Authorization", signature.authorization)
            .body(body)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))
    }

    /// Decode a failed call into a remote error.
    async fn remote_error(response: reqwest::Response) -> ServiceError {
        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match serde_json::from_str::<ApiError>(&text) {
            Ok(err) if err.kind.is_some() => ServiceError::Remote {
                kind: strip_namespace(err.kind.as_deref().unwrap_or_default()).to_string(),
                message: err.message.unwrap_or_else(|| text.clone()),
            },
            _ => ServiceError::RequestFailed(format!("HTTP {}: {}", status, text)),
        }
    }

    async fn parse_job(response: reqwest::Response) -> Result<TranscriptionJob, ServiceError> {
        let response: TranscriptionJobResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::ParseError(e.to_string()))?;

        response
            .transcription_job
            .ok_or_else(|| ServiceError::ParseError("response is missing the job record".to_string()))?
            .into_domain()
    }
}

/// Error types arrive namespaced, e.g.
/// `com.amazonaws.transcribe#NotFoundException`.
fn strip_namespace(kind: &str) -> &str {
    kind.rsplit('#').next().unwrap_or(kind)
}

#[async_trait]
impl TranscriptionService for TranscribeApiClient {
    async fn get_job(&self, name: &JobName) -> Result<Option<TranscriptionJob>, ServiceError> {
        let body = serde_json::to_string(&GetTranscriptionJobRequest {
            transcription_job_name: name.as_str().to_string(),
        })
        .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        let response = self.send_target(TARGET_GET_JOB, body).await?;

        if !response.status().is_success() {
            return match Self::remote_error(response).await {
                // An unknown job is a normal precondition, not a failure.
                ServiceError::Remote { ref kind, .. } if kind == NOT_FOUND_KIND => Ok(None),
                err => Err(err),
            };
        }

        Self::parse_job(response).await.map(Some)
    }

    async fn start_job(&self, request: StartJob) -> Result<TranscriptionJob, ServiceError> {
        let body = serde_json::to_string(&StartTranscriptionJobRequest {
            transcription_job_name: request.name.as_str().to_string(),
            media: Media {
                media_file_uri: request.media_uri,
            },
            output_bucket_name: request.output_bucket,
            output_key: request.output_key,
            identify_language: request.identify_language,
        })
        .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        let response = self.send_target(TARGET_START_JOB, body).await?;

        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        Self::parse_job(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TranscribeApiClient {
        TranscribeApiClient::with_endpoint(
            Credentials::new("test-key", "test-secret"),
            "us-east-1",
            server.uri().parse().unwrap(),
        )
    }

    fn name(s: &str) -> JobName {
        JobName::new(s).unwrap()
    }

    #[test]
    fn strip_namespace_handles_both_forms() {
        assert_eq!(
            strip_namespace("com.amazonaws.transcribe#NotFoundException"),
            "NotFoundException"
        );
        assert_eq!(strip_namespace("NotFoundException"), "NotFoundException");
    }

    #[tokio::test]
    async fn get_job_parses_completed_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("x-amz-target", "Transcribe.GetTranscriptionJob"))
            .and(header("content-type", "application/x-amz-json-1.1"))
            .and(header_exists("authorization"))
            .and(body_partial_json(json!({"TranscriptionJobName": "clip.mp4"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TranscriptionJob": {
                    "TranscriptionJobName": "clip.mp4",
                    "TranscriptionJobStatus": "COMPLETED",
                    "Transcript": {
                        "TranscriptFileUri": "https://example.com/clip.mp4.transcription"
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let job = client_for(&server)
            .get_job(&name("clip.mp4"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(
            job.transcript_uri.as_deref(),
            Some("https://example.com/clip.mp4.transcription")
        );
    }

    #[tokio::test]
    async fn get_job_maps_not_found_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-amz-target", "Transcribe.GetTranscriptionJob"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "com.amazonaws.transcribe#NotFoundException",
                "message": "The requested job couldn't be found."
            })))
            .mount(&server)
            .await;

        let job = client_for(&server).get_job(&name("clip.mp4")).await.unwrap();
        assert!(job.is_none());
    }

    #[tokio::test]
    async fn get_job_surfaces_other_remote_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "BadRequestException",
                "message": "Invalid job name."
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_job(&name("clip.mp4"))
            .await
            .unwrap_err();

        match err {
            ServiceError::Remote { kind, message } => {
                assert_eq!(kind, "BadRequestException");
                assert_eq!(message, "Invalid job name.");
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_job_failed_record_carries_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TranscriptionJob": {
                    "TranscriptionJobName": "clip.mp4",
                    "TranscriptionJobStatus": "FAILED",
                    "FailureReason": "The media format is not supported."
                }
            })))
            .mount(&server)
            .await;

        let job = client_for(&server)
            .get_job(&name("clip.mp4"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(
            job.failure_reason.as_deref(),
            Some("The media format is not supported.")
        );
    }

    #[tokio::test]
    async fn start_job_sends_media_and_output_location() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("x-amz-target", "Transcribe.StartTranscriptionJob"))
            .and(header_exists("authorization"))
            .and(header_exists("x-amz-date"))
            .and(body_partial_json(json!({
                "TranscriptionJobName": "clip.mp4",
                "Media": {"MediaFileUri": "s3://media-bucket/clip.mp4"},
                "OutputBucketName": "media-bucket",
                "OutputKey": "clip.mp4.transcription",
                "IdentifyLanguage": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TranscriptionJob": {
                    "TranscriptionJobName": "clip.mp4",
                    "TranscriptionJobStatus": "IN_PROGRESS"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let job = client_for(&server)
            .start_job(StartJob {
                name: name("clip.mp4"),
                media_uri: "s3://media-bucket/clip.mp4".to_string(),
                output_bucket: "media-bucket".to_string(),
                output_key: "clip.mp4.transcription".to_string(),
                identify_language: true,
            })
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::InProgress);
    }

    #[tokio::test]
    async fn start_job_conflict_is_a_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "__type": "ConflictException",
                "message": "A job with this name already exists."
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .start_job(StartJob {
                name: name("clip.mp4"),
                media_uri: "s3://media-bucket/clip.mp4".to_string(),
                output_bucket: "media-bucket".to_string(),
                output_key: "clip.mp4.transcription".to_string(),
                identify_language: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Remote { ref kind, .. } if kind == "ConflictException"));
    }
}
