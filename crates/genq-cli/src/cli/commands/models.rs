//! `genq models` – list the model catalog.

use anyhow::Result;
use genq_core::api::ApiClient;
use genq_core::identity::Identity;
use genq_core::media::MediaKind;
use genq_core::session::init_session;
use genq_core::ui::{UiEvent, UiState};

pub async fn run_models(api: &ApiClient, identity: Identity) -> Result<()> {
    let session = init_session(api, identity).await?;
    let state = UiState::default().apply(UiEvent::ModelsLoaded {
        catalog: session.catalog,
        notice: session.notice,
    });
    eprintln!("{}", state.status);

    for kind in MediaKind::ALL {
        println!("{}:", kind);
        let options = state.options(kind);
        if options.is_empty() {
            println!("  (none)");
        }
        for opt in options {
            let marker = if opt.selected { "*" } else { " " };
            println!("  {} {}", marker, opt.label);
        }
    }
    Ok(())
}
