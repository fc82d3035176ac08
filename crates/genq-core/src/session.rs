//! Startup: register the user, then load the model catalog.

use std::fmt;

use crate::api::MiniAppApi;
use crate::error::Result;
use crate::identity::Identity;
use crate::models::ModelCatalog;

/// Who the session acts as, for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Connected(i64),
    /// No messenger identity; the server will reject submissions.
    Anonymous,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Connected(id) => write!(f, "tg_id: {} connected", id),
            Notice::Anonymous => f.write_str("no messenger identity (tg_id=0); submissions will be rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Identity,
    pub catalog: ModelCatalog,
    pub notice: Notice,
}

/// Registers `identity` via `/api/me` (skipped when anonymous) and fetches
/// the catalog. Either request failing fails the whole init.
pub async fn init_session<A: MiniAppApi>(api: &A, identity: Identity) -> Result<Session> {
    let notice = match identity.id() {
        Some(id) => {
            api.register(identity).await?;
            tracing::info!(tg_id = id, "registered");
            Notice::Connected(id)
        }
        None => {
            tracing::warn!("no identity, running anonymous");
            Notice::Anonymous
        }
    };
    let catalog = api.list_models().await?;
    tracing::debug!(
        chat = catalog.chat.len(),
        image = catalog.image.len(),
        video = catalog.video.len(),
        music = catalog.music.len(),
        "model catalog loaded"
    );
    Ok(Session {
        identity,
        catalog,
        notice,
    })
}
