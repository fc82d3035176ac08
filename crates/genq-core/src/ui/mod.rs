//! Front-end state as a plain value.
//!
//! Nothing here touches the network or a terminal. A front end feeds
//! `UiEvent`s through `UiState::apply` and renders whatever comes back.

mod select;

pub use select::{select_options, SelectOption};

use crate::flow::{Outcome, SkipReason};
use crate::job::{Job, JobId};
use crate::media::MediaKind;
use crate::models::ModelCatalog;
use crate::session::Notice;

/// Per-kind tab contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    pub selected_model: Option<String>,
    /// Submit control disabled while a request of this kind is in flight.
    pub busy: bool,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub active: MediaKind,
    /// Global status line.
    pub status: String,
    pub catalog: ModelCatalog,
    panels: [Panel; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    TabSelected(MediaKind),
    ModelsLoaded {
        catalog: ModelCatalog,
        notice: Notice,
    },
    ModelSelected {
        kind: MediaKind,
        id: String,
    },
    SubmitStarted(MediaKind),
    JobCreated {
        kind: MediaKind,
        job_id: JobId,
    },
    JobProgress {
        kind: MediaKind,
        job: Job,
    },
    /// `Err` carries the message to show.
    Finished {
        kind: MediaKind,
        result: Result<Outcome, String>,
    },
    InitFailed(String),
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active: MediaKind::Chat,
            status: "Connecting…".to_string(),
            catalog: ModelCatalog::default(),
            panels: Default::default(),
        }
    }
}

fn slot(kind: MediaKind) -> usize {
    match kind {
        MediaKind::Chat => 0,
        MediaKind::Image => 1,
        MediaKind::Video => 2,
        MediaKind::Music => 3,
    }
}

impl UiState {
    pub fn panel(&self, kind: MediaKind) -> &Panel {
        &self.panels[slot(kind)]
    }

    fn panel_mut(&mut self, kind: MediaKind) -> &mut Panel {
        &mut self.panels[slot(kind)]
    }

    /// Selected model id for `kind`, if the catalog offers any.
    pub fn selected_model(&self, kind: MediaKind) -> Option<&str> {
        self.panel(kind).selected_model.as_deref()
    }

    pub fn options(&self, kind: MediaKind) -> Vec<SelectOption> {
        select_options(self.catalog.for_kind(kind), self.selected_model(kind))
    }

    pub fn apply(mut self, event: UiEvent) -> UiState {
        match event {
            UiEvent::TabSelected(kind) => self.active = kind,
            UiEvent::ModelsLoaded { catalog, notice } => {
                for kind in MediaKind::ALL {
                    let keep = self
                        .selected_model(kind)
                        .filter(|id| catalog.contains(kind, id))
                        .map(str::to_string);
                    self.panel_mut(kind).selected_model =
                        keep.or_else(|| catalog.default_for(kind).map(|m| m.id.clone()));
                }
                self.catalog = catalog;
                self.status = match notice {
                    Notice::Connected(_) => format!("{}. Ready", notice),
                    Notice::Anonymous => format!("Warning: {}", notice),
                };
            }
            UiEvent::ModelSelected { kind, id } => {
                if self.catalog.contains(kind, &id) {
                    self.panel_mut(kind).selected_model = Some(id);
                }
            }
            UiEvent::SubmitStarted(kind) => {
                let p = self.panel_mut(kind);
                p.busy = true;
                p.output.clear();
            }
            UiEvent::JobCreated { kind, job_id } => {
                let waiting = if kind == MediaKind::Chat {
                    "Waiting for the answer…"
                } else {
                    "Waiting…"
                };
                self.panel_mut(kind).output = format!("Created job: {}\n{}", job_id, waiting);
            }
            UiEvent::JobProgress { kind, job } => {
                self.panel_mut(kind).output = format!("job {}: {}…", job.id, job.status);
            }
            // The in-flight submission still owns the panel.
            UiEvent::Finished {
                result: Ok(Outcome::Skipped(SkipReason::Busy)),
                ..
            } => {}
            UiEvent::Finished { kind, result } => {
                let p = self.panel_mut(kind);
                p.busy = false;
                p.output = match result {
                    Ok(Outcome::Completed { output, .. }) => output.to_string(),
                    Ok(Outcome::Skipped(_)) => String::new(),
                    Err(msg) => format!("Error: {}", msg),
                };
            }
            UiEvent::InitFailed(msg) => self.status = format!("Init error: {}", msg),
        }
        self
    }
}
