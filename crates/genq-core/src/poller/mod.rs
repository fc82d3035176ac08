//! Fixed-interval polling of a job until it reaches a terminal status.
//!
//! Ticks are strictly sequential: one status request at a time, then a
//! sleep of `interval`. A tick is not started once `max_wait` has elapsed,
//! so a timeout overshoots the deadline by at most one interval plus the
//! duration of the last request. Cancellation interrupts both the pending
//! request and the sleep.

mod session;

pub use session::PollSession;

use std::future::Future;
use std::time::Duration;

use crate::config::GenqConfig;
use crate::control::{or_cancelled, CancelToken};
use crate::error::{Error, Result};
use crate::job::{Job, JobId, JobStatus};
use crate::retry::{run_with_retry, RetryPolicy};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(30 * 60);

/// Message used when a job fails without saying why.
const UNKNOWN_JOB_ERROR: &str = "unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    pub max_wait: Duration,
    /// Retry transient failures within one tick. `None` aborts on the first failure.
    pub tick_retry: Option<RetryPolicy>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
            tick_retry: None,
        }
    }
}

impl PollOptions {
    pub fn from_config(cfg: &GenqConfig) -> Self {
        Self {
            interval: Duration::from_millis(cfg.poll_interval_ms),
            max_wait: Duration::from_secs(cfg.max_wait_secs),
            tick_retry: cfg.tick_retry.as_ref().map(RetryPolicy::from),
        }
    }
}

/// Polls `fetch` until the job is `done` (returned) or `error` (`JobFailed`).
///
/// `on_progress` sees every non-terminal snapshot, once per tick, in order.
/// Fails with `PollTimeout` when `max_wait` passes first and with `Cancelled`
/// when `cancel` is set; request failures propagate as they are unless
/// `tick_retry` absorbs them.
pub async fn poll_job<F, Fut, P>(
    job_id: &JobId,
    opts: &PollOptions,
    cancel: Option<&CancelToken>,
    mut fetch: F,
    mut on_progress: P,
) -> Result<Job>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Job>>,
    P: FnMut(&Job),
{
    let mut session = PollSession::start(job_id.clone(), opts.max_wait);
    loop {
        check_cancel(cancel, &session)?;
        if session.expired() {
            tracing::warn!(job_id = %job_id, ticks = session.ticks(), "poll deadline reached");
            return Err(Error::PollTimeout {
                job_id: job_id.clone(),
                waited: session.elapsed(),
            });
        }

        let attempt = async {
            match &opts.tick_retry {
                Some(policy) => run_with_retry(policy, &mut fetch).await,
                None => fetch().await,
            }
        };
        let job = match or_cancelled(cancel, attempt).await {
            Some(fetched) => fetched?,
            None => return Err(cancelled(&session)),
        };
        session.observe(&job.status);

        match job.status {
            JobStatus::Done => {
                tracing::info!(job_id = %job_id, ticks = session.ticks(), "job done");
                return Ok(job);
            }
            JobStatus::Error => {
                let message = job
                    .error
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_JOB_ERROR.to_string());
                tracing::info!(job_id = %job_id, "job failed: {}", message);
                return Err(Error::JobFailed {
                    job_id: job_id.clone(),
                    message,
                });
            }
            _ => on_progress(&job),
        }

        check_cancel(cancel, &session)?;
        if or_cancelled(cancel, tokio::time::sleep(opts.interval)).await.is_none() {
            return Err(cancelled(&session));
        }
    }
}

fn check_cancel(cancel: Option<&CancelToken>, session: &PollSession) -> Result<()> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(cancelled(session)),
        _ => Ok(()),
    }
}

fn cancelled(session: &PollSession) -> Error {
    tracing::info!(job_id = %session.job_id(), ticks = session.ticks(), "poll cancelled");
    Error::Cancelled {
        job_id: session.job_id().clone(),
    }
}
