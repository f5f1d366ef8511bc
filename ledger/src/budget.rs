//! Shared request-rate budget using the token bucket algorithm.
//!
//! Every ledger attempt — first try or retry, from any caller — acquires one
//! token before issuing the request, so concurrent callers cannot
//! collectively exceed the remote request-per-second ceiling.

use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Async token bucket sized to the remote requests-per-second limit.
///
/// Tokens refill over time at `max_per_sec`. The bucket can hold at most
/// 2× the rate to allow short bursts after idle periods.
pub struct RateBudget {
    max_per_sec: u64,
    state: Mutex<BudgetState>,
}

struct BudgetState {
    tokens: u64,
    last_refill: Instant,
}

impl RateBudget {
    /// Create a budget with the given requests-per-second limit.
    ///
    /// The bucket starts full at the per-second rate, allowing an initial
    /// burst of up to `max_per_sec` requests.
    pub fn new(max_per_sec: u64) -> Self {
        let max_per_sec = max_per_sec.max(1);
        Self {
            max_per_sec,
            state: Mutex::new(BudgetState {
                tokens: max_per_sec,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Wait until one request token is available, then consume it.
    pub async fn acquire(&self) {
        loop {
            if self.try_acquire() {
                return;
            }
            tokio::time::sleep(self.refill_interval()).await;
        }
    }

    /// Try to consume one token without waiting.
    pub fn try_acquire(&self) -> bool {
        let mut state = self.state.lock().expect("rate budget lock poisoned");
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill);
        let new_tokens = (elapsed.as_millis() as u64 * self.max_per_sec) / 1000;
        if new_tokens > 0 {
            // Cap at 2× rate to limit burst size.
            state.tokens = (state.tokens + new_tokens).min(self.max_per_sec * 2);
            state.last_refill = now;
        }
        if state.tokens >= 1 {
            state.tokens -= 1;
            true
        } else {
            false
        }
    }

    /// Time for one token to refill at the configured rate.
    fn refill_interval(&self) -> Duration {
        Duration::from_millis((1000 / self.max_per_sec).max(1))
    }

    /// The configured requests-per-second limit.
    pub fn max_per_sec(&self) -> u64 {
        self.max_per_sec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_starts_full() {
        let budget = RateBudget::new(5);
        for _ in 0..5 {
            assert!(budget.try_acquire());
        }
        assert!(!budget.try_acquire());
    }

    #[test]
    fn zero_rate_is_clamped_to_one() {
        let budget = RateBudget::new(0);
        assert_eq!(budget.max_per_sec(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn acquire_waits_for_refill() {
        let budget = RateBudget::new(2);
        let start = Instant::now();

        // Initial burst of 2, then each further token costs ~500ms.
        budget.acquire().await;
        budget.acquire().await;
        budget.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn burst_is_capped_at_twice_rate() {
        let budget = RateBudget::new(4);
        // Drain, then idle long enough to overfill an uncapped bucket.
        for _ in 0..4 {
            assert!(budget.try_acquire());
        }
        tokio::time::sleep(Duration::from_secs(60)).await;

        let mut available = 0;
        while budget.try_acquire() {
            available += 1;
        }
        assert_eq!(available, 8);
    }
}
