//! Model catalog served by `/api/models`.

use serde::{Deserialize, Serialize};

use crate::media::MediaKind;

/// A selectable generation backend for one media kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Sent back to the server as `model` on submission.
    pub id: String,
    pub title: String,
    #[serde(default, alias = "isDefault")]
    pub is_default: bool,
}

/// Models partitioned by media kind. Fetched once per session and not
/// modified afterwards; a missing list is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    pub chat: Vec<ModelDescriptor>,
    #[serde(default)]
    pub image: Vec<ModelDescriptor>,
    #[serde(default)]
    pub video: Vec<ModelDescriptor>,
    #[serde(default)]
    pub music: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    pub fn for_kind(&self, kind: MediaKind) -> &[ModelDescriptor] {
        match kind {
            MediaKind::Chat => &self.chat,
            MediaKind::Image => &self.image,
            MediaKind::Video => &self.video,
            MediaKind::Music => &self.music,
        }
    }

    /// Initial selection: the first entry flagged `is_default`, else the first entry.
    pub fn default_for(&self, kind: MediaKind) -> Option<&ModelDescriptor> {
        let models = self.for_kind(kind);
        models.iter().find(|m| m.is_default).or_else(|| models.first())
    }

    pub fn contains(&self, kind: MediaKind, id: &str) -> bool {
        self.for_kind(kind).iter().any(|m| m.id == id)
    }
}
