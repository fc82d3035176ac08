//! One user-triggered generation request, end to end.
//!
//! Guard input, mark the kind busy, create the job, poll it, map the result.
//! The same code path serves all four media kinds; everything kind-specific
//! comes from `MediaKind` and `MediaInput`.

use crate::api::{MiniAppApi, Submitted};
use crate::control::{or_cancelled, CancelToken, SubmissionControl};
use crate::error::{Error, Result};
use crate::job::{Job, JobId};
use crate::media::{MediaKind, MediaOutput, SubmitRequest};
use crate::poller::{self, PollOptions};

/// Why a submission was not sent. Neither case is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Primary text field was empty after trimming.
    EmptyInput,
    /// A submission of the same kind is still in flight.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `job_id` is `None` when the server answered synchronously.
    Completed {
        job_id: Option<JobId>,
        output: MediaOutput,
    },
    Skipped(SkipReason),
}

/// Progress notifications delivered while a submission is in flight.
#[derive(Debug, Clone, Copy)]
pub enum FlowProgress<'a> {
    /// The job was created and polling is about to start.
    Submitted { kind: MediaKind, job_id: &'a JobId },
    /// A non-terminal status observation.
    Polled(&'a Job),
}

/// Submission flow bound to one backend.
#[derive(Debug)]
pub struct SubmissionFlow<A> {
    api: A,
    poll: PollOptions,
    control: SubmissionControl,
}

impl<A: MiniAppApi> SubmissionFlow<A> {
    pub fn new(api: A, poll: PollOptions) -> Self {
        Self {
            api,
            poll,
            control: SubmissionControl::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn control(&self) -> &SubmissionControl {
        &self.control
    }

    pub fn poll_options(&self) -> &PollOptions {
        &self.poll
    }

    /// Runs one submission. Blank input and a busy kind are silent no-ops;
    /// every other failure is returned for the caller to display. The kind is
    /// marked busy for the whole call and released on every exit path.
    /// `cancel` interrupts the submit request as well as the poll.
    pub async fn submit<P>(
        &self,
        request: &SubmitRequest,
        cancel: Option<&CancelToken>,
        mut on_progress: P,
    ) -> Result<Outcome>
    where
        P: FnMut(FlowProgress<'_>),
    {
        let kind = request.kind();
        if request.input.is_blank() {
            tracing::debug!(kind = %kind, "empty {}, nothing to submit", kind.primary_field());
            return Ok(Outcome::Skipped(SkipReason::EmptyInput));
        }
        let Some(_guard) = self.control.try_acquire(kind) else {
            tracing::debug!(kind = %kind, "submission already in flight");
            return Ok(Outcome::Skipped(SkipReason::Busy));
        };

        let submitted = or_cancelled(cancel, self.api.submit(request))
            .await
            .ok_or(Error::SubmitCancelled { kind })??;
        let job_id = match submitted {
            Submitted::Queued(id) => id,
            Submitted::Immediate(text) if kind == MediaKind::Chat => {
                tracing::info!(kind = %kind, "answered synchronously");
                return Ok(Outcome::Completed {
                    job_id: None,
                    output: MediaOutput::Text(text),
                });
            }
            Submitted::Immediate(_) => {
                return Err(Error::MalformedResponse(format!(
                    "{} submit returned text instead of a job id",
                    kind
                )));
            }
        };
        tracing::info!(kind = %kind, job_id = %job_id, model = %request.model, "job created");
        on_progress(FlowProgress::Submitted {
            kind,
            job_id: &job_id,
        });

        let job = poller::poll_job(
            &job_id,
            &self.poll,
            cancel,
            || self.api.fetch_job(kind, &job_id),
            |j| on_progress(FlowProgress::Polled(j)),
        )
        .await?;

        let output = MediaOutput::from_result(kind, job.result.as_ref())?;
        Ok(Outcome::Completed {
            job_id: Some(job_id),
            output,
        })
    }
}
