//! Scripted in-memory backend for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::api::{Body, MiniAppApi, Submitted};
use crate::error::{Error, Result};
use crate::identity::Identity;
use crate::job::{Job, JobId, JobStatus};
use crate::media::{MediaKind, SubmitRequest};
use crate::models::ModelCatalog;

/// Answers from fixed scripts and records every call.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub catalog: ModelCatalog,
    pub submit_reply: RefCell<Option<Result<Submitted>>>,
    pub job_replies: RefCell<VecDeque<Result<Job>>>,
    pub register_error: RefCell<Option<Error>>,
    pub submits: RefCell<Vec<SubmitRequest>>,
    pub fetches: Cell<u32>,
    /// Submit never answers, like a stalled server.
    pub hang_submit: Cell<bool>,
    pub registrations: RefCell<Vec<Identity>>,
}

impl FakeApi {
    pub fn queued(id: i64, replies: Vec<Result<Job>>) -> Self {
        Self {
            submit_reply: RefCell::new(Some(Ok(Submitted::Queued(JobId::from(id))))),
            job_replies: RefCell::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn request_count(&self) -> usize {
        self.submits.borrow().len() + self.fetches.get() as usize + self.registrations.borrow().len()
    }
}

impl MiniAppApi for FakeApi {
    async fn list_models(&self) -> Result<ModelCatalog> {
        Ok(self.catalog.clone())
    }

    async fn register(&self, identity: Identity) -> Result<Body> {
        self.registrations.borrow_mut().push(identity);
        match self.register_error.borrow_mut().take() {
            Some(e) => Err(e),
            None => Ok(Body::Parsed(serde_json::json!({"tg_id": identity.wire_id()}))),
        }
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<Submitted> {
        self.submits.borrow_mut().push(request.clone());
        if self.hang_submit.get() {
            std::future::pending::<()>().await;
        }
        self.submit_reply
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(Error::MalformedResponse("no scripted submit reply".into())))
    }

    async fn fetch_job(&self, _kind: MediaKind, id: &JobId) -> Result<Job> {
        self.fetches.set(self.fetches.get() + 1);
        self.job_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Job::new(id.clone(), JobStatus::Pending)))
    }
}
