//! TranscribeGateway - HTTP gateway for managed cloud transcription jobs
//!
//! This crate turns the asynchronous job lifecycle of a managed
//! transcription service into one synchronous HTTP request: ensure a
//! job exists for the requested media file, poll until it finishes,
//! then return the transcript JSON.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Job value objects, status model, and polling policy
//! - **Application**: The orchestration use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (signed service client,
//!   transcript fetcher, configuration)
//! - **Server**: axum router and the transcript endpoint

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod server;
