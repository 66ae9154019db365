//! Bounded retry with exponential backoff for inventory calls.

use std::future::Future;
use std::time::Duration;

use netinv_common::error::{InventoryError, InventoryResult};
use rand::Rng;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, the first call included. `0` behaves like `1`.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// Retries immediately. Used by tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    pub fn should_retry(&self, attempt: u32, error: &InventoryError) -> bool {
        attempt + 1 < self.max_attempts.max(1) && error.is_retryable()
    }

    /// `base * 2^attempt` capped at `max_delay`, plus up to 25% jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponential = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay);
        if exponential.is_zero() {
            return exponential;
        }
        let jitter_ms = (exponential.as_millis() as u64 / 4).max(1);
        exponential + Duration::from_millis(rand::rng().random_range(0..=jitter_ms))
    }

    /// Runs `f` until it succeeds, fails with a non-transient error, or the
    /// attempts are used up. The last error is returned unchanged.
    pub async fn execute<F, Fut, T>(&self, operation: &str, mut f: F) -> InventoryResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = InventoryResult<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match f().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(operation, attempt = attempt + 1, "Succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(error) if self.should_retry(attempt, &error) => {
                    let delay = self.delay_for(attempt);
                    debug!(
                        operation,
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Retrying after transient error"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    if attempt > 0 {
                        warn!(operation, attempts = attempt + 1, error = %error, "Giving up");
                    }
                    return Err(error);
                }
            }
        }
    }
}
