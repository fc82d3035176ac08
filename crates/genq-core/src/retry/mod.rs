//! Bounded retry for individual poll ticks.
//!
//! Off by default: a failed status fetch aborts the wait. When a tick retry
//! policy is configured, transport failures, throttling and 5xx responses
//! are retried with capped exponential backoff; 4xx and interpretation
//! failures are treated as authoritative and returned immediately.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
