//! Bounded retry for feed fetches
//!
//! Every attempt counts against `max_attempts`. A rate-limited attempt waits
//! `(attempt + 1) * rate_limit_step`; any other failure waits `failure_delay`.
//! Nothing is slept after the final attempt.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::FeedConfig;
use crate::errors::{FetchError, FetchResult};

/// Something that can wait; swapped out in tests so retries run instantly
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real wall-clock sleeping on the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Wait after a generic failure
    pub failure_delay: Duration,
    /// Base step for rate-limit waits
    pub rate_limit_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_feed_config(&FeedConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_feed_config(feed: &FeedConfig) -> Self {
        Self {
            max_attempts: feed.max_retries.max(1),
            failure_delay: feed.retry_delay,
            rate_limit_step: feed.rate_limit_backoff,
        }
    }

    /// How long to wait after `attempt` (0-based) failed with `error`.
    /// `None` means the attempts are exhausted.
    pub fn delay_after(&self, attempt: u32, error: &FetchError) -> Option<Duration> {
        if attempt + 1 >= self.max_attempts {
            return None;
        }
        if error.is_rate_limited() {
            Some(self.rate_limit_step * (attempt + 1))
        } else {
            Some(self.failure_delay)
        }
    }
}

/// Run `operation` until it succeeds or the policy gives up, returning the
/// last error in the latter case.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut operation: F,
    operation_name: &str,
) -> FetchResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = FetchResult<T>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "'{}' succeeded on attempt {}/{}",
                        operation_name,
                        attempt + 1,
                        policy.max_attempts
                    );
                }
                return Ok(result);
            }
            Err(err) => match policy.delay_after(attempt, &err) {
                Some(delay) => {
                    warn!(
                        "'{}' failed on attempt {}/{}, retrying in {:?}: {}",
                        operation_name,
                        attempt + 1,
                        policy.max_attempts,
                        delay,
                        err
                    );
                    sleeper.sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    warn!(
                        "'{}' failed after {} attempt(s): {}",
                        operation_name, policy.max_attempts, err
                    );
                    return Err(err);
                }
            },
        }
    }
}
