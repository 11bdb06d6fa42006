//! Retry with exponential backoff
//!
//! The crawl orchestrator and the summarizer share the same retry shape:
//! a bounded number of attempts with `base * 2^i` sleeps between them.
//! `RetryPolicy` holds that shape in one place so both components (and
//! their tests) configure it instead of duplicating the loop.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Bounded retry policy with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    max_attempts: u32,

    /// Delay before the second attempt; doubles for each attempt after that
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    /// Create a policy with `max_attempts` total attempts (must be at least 1)
    /// and a backoff base delay.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Total number of attempts this policy allows
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Backoff duration after the failed attempt with 0-based index `attempt`:
    /// `base_delay * 2^attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Drive `op` until it succeeds, the attempt budget is exhausted, or an
    /// error is classified as not retryable.
    ///
    /// `op` receives the 0-based attempt index. The error from the last
    /// attempt is returned on failure.
    pub async fn run<T, E, Op, Fut, P>(&self, mut op: Op, retryable: P) -> Result<T, E>
    where
        Op: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let mut attempt = 0;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let completed = attempt + 1;
                    if completed >= self.max_attempts || !retryable(&err) {
                        return Err(err);
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        attempt = completed,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "attempt failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt = completed;
                }
            }
        }
    }
}
