//! Gateway configuration
//!
//! All settings come from CLI flags with environment fallbacks;
//! there is no config file.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::domain::PollPolicy;

use super::transcription::Credentials;

/// Runtime configuration for the gateway.
#[derive(Debug, Parser)]
#[command(
    name = "transcribe-gateway",
    version,
    about = "HTTP gateway that fronts managed cloud transcription jobs"
)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind_addr: SocketAddr,

    /// Region hosting the transcription service
    #[arg(long, env = "AWS_REGION", default_value = "ap-south-1")]
    pub region: String,

    /// Access key id for the transcription service
    #[arg(long, env = "ACCESS_KEY", hide_env_values = true)]
    pub access_key: String,

    /// Secret access key for the transcription service
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Bucket holding input media; transcripts are written back to it
    #[arg(long, env = "BUCKET_NAME")]
    pub bucket: String,

    /// Seconds between job status polls
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = 5)]
    pub poll_interval_secs: u64,

    /// Maximum seconds to wait for one job before reporting a timeout
    #[arg(long, env = "MAX_WAIT_SECS", default_value_t = 900)]
    pub max_wait_secs: u64,

    /// Override the transcription service endpoint (local testing)
    #[arg(long, env = "TRANSCRIBE_ENDPOINT", hide = true)]
    pub endpoint: Option<Url>,
}

impl GatewayConfig {
    /// Polling behavior derived from the configured intervals.
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            Duration::from_secs(self.poll_interval_secs),
            Duration::from_secs(self.max_wait_secs),
        )
    }

    /// Access key pair for request signing.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.access_key, &self.secret_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> GatewayConfig {
        let base = [
            "transcribe-gateway",
            "--access-key",
            "AKID",
            "--secret-key",
            "secret",
            "--bucket",
            "media-bucket",
        ];
        GatewayConfig::try_parse_from(base.iter().copied().chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.region, "ap-south-1");
        assert_eq!(config.poll_interval_secs, 5);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn poll_policy_uses_configured_intervals() {
        let config = parse(&["--poll-interval-secs", "2", "--max-wait-secs", "30"]);
        let policy = config.poll_policy();
        assert_eq!(policy.interval, Duration::from_secs(2));
        assert_eq!(policy.max_wait, Duration::from_secs(30));
    }

    #[test]
    fn missing_bucket_is_rejected() {
        let result = GatewayConfig::try_parse_from([
            "transcribe-gateway",
            "--access-key",
            "AKID",
            "--secret-key",
            "secret",
        ]);
        assert!(result.is_err());
    }
}
