//! Error taxonomy for API requests and job submission.
//!
//! `RequestError` covers a single HTTP exchange; `Error` is what a submission
//! or poll surfaces to its caller. Nothing here is recovered locally except
//! through an explicitly configured tick retry policy.

use std::time::Duration;

use crate::job::JobId;
use crate::media::MediaKind;

/// Failure of one HTTP request: non-2xx status or transport failure.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Server answered with a non-2xx status. `message` is already extracted
    /// from the body (`detail`, then `error`, then raw text, then `HTTP <status>`).
    #[error("{message}")]
    Http { status: u32, message: String },
    /// libcurl reported a failure (connect, DNS, timeout, reset).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// The blocking task running the request could not complete.
    #[error("request task failed: {0}")]
    Runtime(String),
}

impl RequestError {
    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u32> {
        match self {
            RequestError::Http { status, .. } => Some(*status),
            RequestError::Transport(_) | RequestError::Runtime(_) => None,
        }
    }
}

/// Error surfaced by the poller and the submission flow.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] RequestError),
    /// Server reported terminal `error` status for the job.
    #[error("{message}")]
    JobFailed { job_id: JobId, message: String },
    /// No terminal status was observed within the maximum wait.
    #[error("timed out waiting for job {job_id} after {}s", waited.as_secs())]
    PollTimeout { job_id: JobId, waited: Duration },
    /// Caller cancelled the wait.
    #[error("waiting for job {job_id} was cancelled")]
    Cancelled { job_id: JobId },
    /// Cancelled before the server answered the submit request.
    #[error("{kind} submission was cancelled")]
    SubmitCancelled { kind: MediaKind },
    /// A 2xx body that could not be interpreted (e.g. raw text where a job id was expected).
    #[error("unexpected response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
