//! Cancellation and per-control busy tracking.
//!
//! A `CancelToken` is threaded through a submission and its poll loop. Every
//! request and interval sleep is raced against it, so a cancel takes effect
//! even while a request is hanging.
//! `SubmissionControl` plays the role of the disabled button: while a kind
//! has a submission in flight, another submission of that kind is skipped.
//! The `ControlGuard` returned by `try_acquire` re-enables the control when
//! dropped, whatever way the flow ends.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::media::MediaKind;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<CancelState>);

#[derive(Debug, Default)]
struct CancelState {
    flag: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.flag.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.flag.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called (immediately if it already was).
    pub async fn cancelled(&self) {
        loop {
            // Register before checking so a concurrent cancel is not missed.
            let notified = self.0.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Runs `fut` to completion unless `cancel` fires first, in which case `fut`
/// is dropped and `None` is returned.
pub async fn or_cancelled<F: Future>(cancel: Option<&CancelToken>, fut: F) -> Option<F::Output> {
    match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => None,
                out = fut => Some(out),
            }
        }
        None => Some(fut.await),
    }
}

/// Set of media kinds with a submission in flight.
#[derive(Debug, Default)]
pub struct SubmissionControl {
    busy: Mutex<HashSet<MediaKind>>,
}

impl SubmissionControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `kind` busy. Returns `None` if it already is.
    pub fn try_acquire(&self, kind: MediaKind) -> Option<ControlGuard<'_>> {
        let mut busy = self.busy.lock().unwrap_or_else(|e| e.into_inner());
        if busy.insert(kind) {
            Some(ControlGuard {
                control: self,
                kind,
            })
        } else {
            None
        }
    }

    pub fn is_busy(&self, kind: MediaKind) -> bool {
        self.busy
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&kind)
    }

    fn release(&self, kind: MediaKind) {
        self.busy
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&kind);
    }
}

/// Clears the busy mark for its kind when dropped.
#[derive(Debug)]
pub struct ControlGuard<'a> {
    control: &'a SubmissionControl,
    kind: MediaKind,
}

impl ControlGuard<'_> {
    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

impl Drop for ControlGuard<'_> {
    fn drop(&mut self) {
        self.control.release(self.kind);
    }
}
