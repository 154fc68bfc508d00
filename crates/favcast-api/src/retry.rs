// ── Bounded fixed-delay retry ──

use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Attempt budget for one logical operation.
///
/// Fixed delay between attempts, no jitter, no growth. Platforms that
/// need retries at all (currently only Bilibili's flaky room endpoints)
/// recover within a couple of closely spaced attempts or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Sleep between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }

    /// Fixed schedule: `max_attempts` tries spaced `delay` apart.
    pub const fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Drive `op` under `policy` until it succeeds or attempts run out.
///
/// `op` receives the 1-based attempt number. The delay is slept between
/// attempts only -- a final failure returns immediately with the last
/// error. An early success short-circuits the schedule.
pub async fn with_retry<T, E, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let budget = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < budget => {
                debug!(attempt, budget, error = %err, "attempt failed, retrying after delay");
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
