//! Linear-backoff retry for idempotent reads.
//!
//! The sleep function is injected so the same loop runs on `gloo-timers` in
//! the browser and on a recording stub in tests.

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

use std::fmt::Display;
use std::future::Future;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 3, base_delay_ms: 1000 }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `retry` (counted from 1).
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> u64 {
        self.base_delay_ms.saturating_mul(u64::from(retry))
    }
}

/// Run `op`, retrying on error up to `policy.max_retries` times.
///
/// The error is surfaced only after the final retry has waited out its
/// backoff and failed.
///
/// # Errors
///
/// Returns the last error produced by `op`.
pub async fn retry_with_backoff<T, E, Op, OpFut, Sleep, SleepFut>(
    policy: RetryPolicy,
    mut op: Op,
    mut sleep: Sleep,
) -> Result<T, E>
where
    E: Display,
    Op: FnMut() -> OpFut,
    OpFut: Future<Output = Result<T, E>>,
    Sleep: FnMut(u64) -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    let mut retry = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if retry < policy.max_retries => {
                retry += 1;
                let delay = policy.delay_for(retry);
                log::warn!("attempt failed ({err}); retry {retry}/{} in {delay}ms", policy.max_retries);
                sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
