//! HTTP transcript fetcher adapter

use async_trait::async_trait;

use crate::application::ports::{FetchError, TranscriptFetcher};

/// Fetches transcript documents over plain HTTP.
///
/// The transcript URI handed out by the transcription service is
/// presigned; no additional authentication is needed.
pub struct HttpTranscriptFetcher {
    client: reqwest::Client,
}

impl HttpTranscriptFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTranscriptFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptFetcher for HttpTranscriptFetcher {
    async fn fetch(&self, uri: &str) -> Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::InvalidJson(e.to_string()))
    }
}
