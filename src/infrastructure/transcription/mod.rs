//! Transcription service adapter module

mod sigv4;
mod transcribe_api;

pub use sigv4::{Credentials, RequestSigner};
pub use transcribe_api::TranscribeApiClient;
