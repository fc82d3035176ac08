//! Media kinds and everything that varies between them.
//!
//! One `MediaKind` value carries the submit endpoint, the result endpoint,
//! the request payload shape and the result-to-display mapping, so the
//! submission flow itself stays kind-agnostic.

mod input;
mod output;

pub use input::{MediaInput, SubmitRequest};
pub use output::MediaOutput;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::job::JobId;

/// Generation mode. Also the tab identity in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Chat,
    Image,
    Video,
    Music,
}

/// Which status endpoint the server exposes for jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultEndpoint {
    /// `/api/job/{id}` for every kind.
    #[default]
    Shared,
    /// `/api/{kind}/result/{id}`.
    PerKind,
}

impl MediaKind {
    pub const ALL: [MediaKind; 4] = [
        MediaKind::Chat,
        MediaKind::Image,
        MediaKind::Video,
        MediaKind::Music,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Chat => "chat",
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Music => "music",
        }
    }

    /// Endpoint that creates a job for this kind.
    pub fn submit_path(self) -> &'static str {
        match self {
            MediaKind::Chat => "/api/chat",
            MediaKind::Image => "/api/image/submit",
            MediaKind::Video => "/api/video/submit",
            MediaKind::Music => "/api/music/submit",
        }
    }

    pub fn result_path(self, endpoint: ResultEndpoint, id: &JobId) -> String {
        match endpoint {
            ResultEndpoint::Shared => format!("/api/job/{}", id),
            ResultEndpoint::PerKind => format!("/api/{}/result/{}", self.as_str(), id),
        }
    }

    /// Name of the required text field in the request payload.
    pub fn primary_field(self) -> &'static str {
        match self {
            MediaKind::Chat => "message",
            MediaKind::Image | MediaKind::Video => "prompt",
            MediaKind::Music => "lyrics",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown media kind: {}", s))
    }
}
