//! # Retry
//!
//! Re-runs a fallible async operation with exponential backoff.
//!
//! The delay before attempt `n + 1` is `delay * multiplier^(n - 1)`, so with the
//! defaults (200ms, x1.5) the waits are 200ms, 300ms, 450ms, ...
//!
//! The caller decides which errors are worth another attempt. Anything else is
//! returned immediately.
use std::{fmt::Display, future::Future, time::Duration};

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(1000),
            multiplier: 1.5,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Wait after the failed `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;

        self.delay.mul_f64(self.multiplier.powi(exponent))
    }
}

pub async fn retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    is_retryable: impl Fn(&E) -> bool,
    mut attempt_fn: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        debug!("{operation}: attempt {attempt}/{max_attempts}");

        match attempt_fn().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("{operation}: succeeded on attempt {attempt}/{max_attempts}");
                }

                return Ok(value);
            }
            Err(e) if !is_retryable(&e) => {
                error!("{operation}: not retrying: {e}");
                return Err(e);
            }
            Err(e) if attempt >= max_attempts => {
                error!("{operation}: giving up after {max_attempts} attempts: {e}");
                return Err(e);
            }
            Err(e) => {
                let wait = policy.backoff(attempt);
                warn!(
                    "{operation}: attempt {attempt}/{max_attempts} failed, retrying in {}ms: {e}",
                    wait.as_millis()
                );

                sleep(wait).await;
                attempt += 1;
            }
        }
    }
}
