//! Async retry loop around one fallible operation.

use std::future::Future;

use super::classify::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::error::Error;

/// Runs `f` until it succeeds or the policy says stop, sleeping on the tokio
/// timer between attempts. The last error is returned unchanged.
pub async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut f: F) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let mut attempt = 1u32;
    loop {
        match f().await {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::warn!(attempt, delay_ms = d.as_millis() as u64, "request failed, retrying: {}", e);
                    tokio::time::sleep(d).await;
                    attempt += 1;
                }
            },
        }
    }
}
