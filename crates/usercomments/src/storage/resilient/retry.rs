//! Retry policy with exponential backoff and per-attempt timeouts.

use std::future::Future;
use std::time::Duration;

use usercomments_core::storage::{RepositoryError, Result};

/// Default number of attempts, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(50);

/// Upper bound for any single backoff delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(2);

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How transient failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Per-attempt timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delay slept after the given failed attempt (1-based): `base * 2^(attempt-1)`, capped.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Runs `operation` until it succeeds, fails with a non-transient error,
    /// or runs out of attempts.
    ///
    /// Each attempt is bounded by `timeout`; an attempt that exceeds it fails
    /// with `RepositoryError::Timeout`, which is retried like any transient error.
    pub async fn run<T, F, Fut>(
        &self,
        operation: &'static str,
        timeout: Option<Duration>,
        f: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run_with(operation, timeout, RepositoryError::is_transient, f)
            .await
    }

    /// Like [`RetryPolicy::run`], but only errors for which `retryable`
    /// returns true are retried.
    pub async fn run_with<T, F, Fut>(
        &self,
        operation: &'static str,
        timeout: Option<Duration>,
        retryable: fn(&RepositoryError) -> bool,
        mut f: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let result = match timeout {
                Some(after) => match tokio::time::timeout(after, f()).await {
                    Ok(result) => result,
                    Err(_) => Err(RepositoryError::Timeout { operation, after }),
                },
                None => f().await,
            };

            match result {
                Err(err) if retryable(&err) && attempt < max_attempts => {
                    let delay = self.backoff_delay(attempt);
                    tracing::warn!(
                        operation,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Store error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
