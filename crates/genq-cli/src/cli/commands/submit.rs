//! `genq chat|image|video|music` – submit one request and wait for the result.

use anyhow::{bail, Result};
use genq_core::api::ApiClient;
use genq_core::control::CancelToken;
use genq_core::flow::{FlowProgress, Outcome, SkipReason, SubmissionFlow};
use genq_core::identity::Identity;
use genq_core::media::{MediaInput, MediaKind, SubmitRequest};
use genq_core::session::init_session;
use genq_core::ui::{UiEvent, UiState};

pub async fn run_submit(
    flow: &SubmissionFlow<ApiClient>,
    identity: Identity,
    model: Option<&str>,
    input: MediaInput,
) -> Result<()> {
    let kind = input.kind();
    let session = match init_session(flow.api(), identity).await {
        Ok(s) => s,
        Err(e) => {
            let state = UiState::default().apply(UiEvent::InitFailed(e.to_string()));
            eprintln!("{}", state.status);
            return Err(e.into());
        }
    };

    let mut state = UiState::default()
        .apply(UiEvent::ModelsLoaded {
            catalog: session.catalog,
            notice: session.notice,
        })
        .apply(UiEvent::TabSelected(kind));
    if let Some(id) = model {
        state = state.apply(UiEvent::ModelSelected {
            kind,
            id: id.to_string(),
        });
        if state.selected_model(kind) != Some(id) {
            bail!("model {:?} is not offered for {}", id, kind);
        }
    }
    eprintln!("{}", state.status);
    let Some(model) = state.selected_model(kind).map(str::to_string) else {
        bail!("no {} models available", kind);
    };

    let request = SubmitRequest::new(session.identity, model, input);
    state = state.apply(UiEvent::SubmitStarted(kind));

    let cancel = CancelToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, cancelling wait");
                cancel.cancel();
            }
        })
    };

    let result = flow
        .submit(&request, Some(&cancel), |p| {
            let event = match p {
                FlowProgress::Submitted { kind, job_id } => UiEvent::JobCreated {
                    kind,
                    job_id: job_id.clone(),
                },
                FlowProgress::Polled(job) => UiEvent::JobProgress {
                    kind,
                    job: job.clone(),
                },
            };
            state = std::mem::take(&mut state).apply(event);
            eprintln!("{}", state.panel(kind).output);
        })
        .await;
    watcher.abort();

    state = finish(state, kind, &result);
    let output = &state.panel(kind).output;
    match result {
        Ok(outcome) => {
            if let Outcome::Skipped(SkipReason::EmptyInput) = outcome {
                eprintln!("nothing to submit: {} is empty", kind.primary_field());
            }
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", output);
            Err(e.into())
        }
    }
}

/// Folds the flow's final result into the panel, failures included.
fn finish(state: UiState, kind: MediaKind, result: &genq_core::Result<Outcome>) -> UiState {
    state.apply(UiEvent::Finished {
        kind,
        result: result.as_ref().cloned().map_err(|e| e.to_string()),
    })
}
