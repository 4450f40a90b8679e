//! Bounded exponential backoff for flaky async operations.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// How often and how patiently to retry.
///
/// The delay after the `n`-th consecutive failure is `initial * 2^(n-1)`,
/// capped at `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay after the first failure.
    pub initial: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Total attempts before giving up; `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(5),
            max_delay: Duration::from_secs(60),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after `failures` consecutive failures (1-based).
    pub fn delay_for(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(16);
        self.initial
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

/// Runs `op` until it succeeds or the policy gives up.
///
/// Every failure is logged before sleeping. When attempts run out, the last
/// error is returned.
pub async fn with_backoff<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempts = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempts += 1;
                if policy.exhausted(attempts) {
                    tracing::error!(attempts, error = %err, "giving up after repeated failures");
                    return Err(err);
                }
                let delay = policy.delay_for(attempts);
                tracing::warn!(
                    attempts,
                    error = %err,
                    retry_in_ms = delay.as_millis() as u64,
                    "operation failed, retrying"
                );
                sleep(delay).await;
            }
        }
    }
}
