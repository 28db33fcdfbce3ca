//! TranscribeGateway entry point

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transcribe_gateway::application::ports::{TranscriptFetcher, TranscriptionService};
use transcribe_gateway::application::{JobStorage, TranscribeJobUseCase};
use transcribe_gateway::infrastructure::{
    GatewayConfig, HttpTranscriptFetcher, TranscribeApiClient,
};
use transcribe_gateway::server::{router, AppState, Orchestrator};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("transcribe_gateway=info")),
        )
        .init();

    let config = GatewayConfig::parse();

    // Wire adapters into the orchestrator
    let client = match config.endpoint.clone() {
        Some(endpoint) => {
            TranscribeApiClient::with_endpoint(config.credentials(), &config.region, endpoint)
        }
        None => TranscribeApiClient::new(config.credentials(), &config.region),
    };
    let service: Box<dyn TranscriptionService> = Box::new(client);
    let fetcher: Box<dyn TranscriptFetcher> = Box::new(HttpTranscriptFetcher::new());

    let orchestrator: Orchestrator = TranscribeJobUseCase::new(
        service,
        fetcher,
        JobStorage::new(&config.bucket),
        config.poll_policy(),
    );

    let app = router(AppState {
        orchestrator: Arc::new(orchestrator),
    });

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.bind_addr, region = %config.region, "listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install shutdown signal handler");
    }
}
