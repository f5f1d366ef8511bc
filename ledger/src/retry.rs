//! Bounded exponential backoff around ledger calls.

use crate::budget::RateBudget;
use crate::error::LedgerError;
use std::future::Future;
use std::time::Duration;

/// Result of running an operation under the retry policy.
#[derive(Debug)]
pub enum RetryOutcome<T> {
    /// The operation succeeded within the attempt budget.
    Success(T),
    /// The operation was abandoned: fatal error, or retries exhausted.
    ///
    /// The caller records the node as `Unknown` and moves on — one stubborn
    /// lookup never blocks a whole run.
    GivenUp {
        attempts: u32,
        last_error: LedgerError,
    },
}

/// Retry policy: `base_delay * 2^attempt`, capped at `max_delay`, up to
/// `max_attempts` attempts. Fatal errors are never retried.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// Backoff delay before re-attempting after attempt number `attempt`
    /// (zero-based).
    fn delay(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        exp.min(self.max_delay)
    }

    /// Run `op` under this policy, drawing one token from `budget` per
    /// attempt (including the first).
    pub async fn execute<T, F, Fut>(&self, budget: &RateBudget, mut op: F) -> RetryOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LedgerError>>,
    {
        let mut attempt = 0u32;
        loop {
            budget.acquire().await;
            match op().await {
                Ok(value) => return RetryOutcome::Success(value),
                Err(e) => {
                    attempt += 1;
                    if !e.is_retryable() || attempt >= self.max_attempts {
                        return RetryOutcome::GivenUp {
                            attempts: attempt,
                            last_error: e,
                        };
                    }
                    let delay = self.delay(attempt - 1);
                    tracing::debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "ledger call failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}
