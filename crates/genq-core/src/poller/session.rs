//! Transient state of one in-flight poll.

use std::time::Duration;
use tokio::time::Instant;

use crate::job::{JobId, JobStatus};

/// Stand-in deadline when `started + max_wait` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Owned by a single `poll_job` call and dropped when it returns.
#[derive(Debug, Clone)]
pub struct PollSession {
    job_id: JobId,
    started: Instant,
    deadline: Instant,
    last_status: Option<JobStatus>,
    ticks: u32,
}

impl PollSession {
    pub fn start(job_id: JobId, max_wait: Duration) -> Self {
        let started = Instant::now();
        Self {
            job_id,
            started,
            deadline: started
                .checked_add(max_wait)
                .unwrap_or_else(|| started + FAR_FUTURE),
            last_status: None,
            ticks: 0,
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    /// Records one status observation.
    pub fn observe(&mut self, status: &JobStatus) {
        self.ticks += 1;
        if self.last_status.as_ref() != Some(status) {
            tracing::debug!(job_id = %self.job_id, tick = self.ticks, status = %status, "job status changed");
        }
        self.last_status = Some(status.clone());
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn last_status(&self) -> Option<&JobStatus> {
        self.last_status.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn expires_at_deadline() {
        let s = PollSession::start(JobId::from(1_i64), Duration::from_secs(10));
        assert!(!s.expired());
        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(!s.expired());
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(s.expired());
        assert_eq!(s.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn huge_max_wait_saturates_instead_of_overflowing() {
        let s = PollSession::start(JobId::from(1_i64), Duration::from_secs(u64::MAX));
        assert!(!s.expired());
        tokio::time::advance(Duration::from_secs(86_400 * 365)).await;
        assert!(!s.expired());
    }

    #[tokio::test(start_paused = true)]
    async fn observe_counts_ticks_and_keeps_latest() {
        let mut s = PollSession::start(JobId::from("j"), Duration::from_secs(1));
        assert!(s.last_status().is_none());
        s.observe(&JobStatus::Queued);
        s.observe(&JobStatus::Running);
        assert_eq!(s.ticks(), 2);
        assert_eq!(s.last_status(), Some(&JobStatus::Running));
        assert_eq!(s.job_id().as_str(), "j");
    }
}
