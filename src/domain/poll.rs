//! Polling policy value object

use std::time::Duration;

/// Default delay between job status polls.
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Default upper bound on the total time spent waiting for one job.
const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(900);

/// How the orchestrator waits for a remote job to finish.
///
/// The wait is always bounded: a job that stays pending past `max_wait`
/// is reported as a timeout instead of being polled forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between consecutive status queries.
    pub interval: Duration,
    /// Maximum total time to wait before giving up on a job.
    pub max_wait: Duration,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}
