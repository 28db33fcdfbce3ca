//! Axum router and the transcript endpoint

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::application::ports::{TranscriptFetcher, TranscriptionService};
use crate::application::TranscribeJobUseCase;
use crate::domain::JobName;

/// Orchestrator over boxed ports, so the wired service and test doubles
/// share one handler state type.
pub type Orchestrator =
    TranscribeJobUseCase<Box<dyn TranscriptionService>, Box<dyn TranscriptFetcher>>;

/// Shared state accessible from handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptParams {
    filename: String,
}

/// Response envelope: the transcript JSON on success, an error string
/// otherwise.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    success: bool,
    message: serde_json::Value,
}

/// Build the axum router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/transcript", get(transcript_handler))
        .with_state(state)
}

/// GET /transcript?filename=<name>
///
/// Blocks until the job for `filename` reaches a terminal state. Every
/// failure, including a job that ended unsuccessfully, renders as a
/// uniform 500 envelope.
async fn transcript_handler(
    State(state): State<AppState>,
    Query(params): Query<TranscriptParams>,
) -> (StatusCode, Json<ApiResponse>) {
    let result = match JobName::new(&params.filename) {
        Ok(name) => state
            .orchestrator
            .execute(&name)
            .await
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match result {
        Ok(transcript) => {
            info!(filename = %params.filename, "transcript delivered");
            (
                StatusCode::OK,
                Json(ApiResponse {
                    success: true,
                    message: transcript,
                }),
            )
        }
        Err(detail) => {
            error!(filename = %params.filename, error = %detail, "transcription request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse {
                    success: false,
                    message: serde_json::Value::String(format!("Internal Server Error: {detail}")),
                }),
            )
        }
    }
}
