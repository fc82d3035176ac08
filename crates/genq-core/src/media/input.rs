//! Submission inputs and the JSON payload each kind sends.

use serde_json::{json, Map, Value};

use super::MediaKind;
use crate::identity::Identity;

/// User-entered fields for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaInput {
    Chat { message: String },
    Image { prompt: String },
    Video { prompt: String },
    Music { lyrics: String, style: Option<String> },
}

impl MediaInput {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaInput::Chat { .. } => MediaKind::Chat,
            MediaInput::Image { .. } => MediaKind::Image,
            MediaInput::Video { .. } => MediaKind::Video,
            MediaInput::Music { .. } => MediaKind::Music,
        }
    }

    /// The required text field (message, prompt or lyrics).
    pub fn primary_text(&self) -> &str {
        match self {
            MediaInput::Chat { message } => message,
            MediaInput::Image { prompt } | MediaInput::Video { prompt } => prompt,
            MediaInput::Music { lyrics, .. } => lyrics,
        }
    }

    /// True when the primary field is empty after trimming; such input is never sent.
    pub fn is_blank(&self) -> bool {
        self.primary_text().trim().is_empty()
    }
}

/// Everything needed to create one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub identity: Identity,
    /// Selected `ModelDescriptor::id`; empty lets the server pick its default.
    pub model: String,
    pub input: MediaInput,
}

impl SubmitRequest {
    pub fn new(identity: Identity, model: impl Into<String>, input: MediaInput) -> Self {
        Self {
            identity,
            model: model.into(),
            input,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.input.kind()
    }

    /// JSON body for the kind's submit endpoint: `{tg_id, model, <primary>}`
    /// plus `style` for music when it is not blank.
    pub fn payload(&self) -> Value {
        let mut body = Map::new();
        body.insert("tg_id".to_string(), json!(self.identity.wire_id()));
        body.insert("model".to_string(), json!(self.model));
        let kind = self.kind();
        body.insert(
            kind.primary_field().to_string(),
            json!(self.input.primary_text()),
        );
        if let MediaInput::Music {
            style: Some(style), ..
        } = &self.input
        {
            if !style.trim().is_empty() {
                body.insert("style".to_string(), json!(style));
            }
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_payload() {
        let req = SubmitRequest::new(
            Identity::from_raw(99),
            "openai/gpt-5.2",
            MediaInput::Chat {
                message: "hello".to_string(),
            },
        );
        assert_eq!(
            req.payload(),
            json!({"tg_id": 99, "model": "openai/gpt-5.2", "message": "hello"})
        );
    }

    #[test]
    fn music_payload_includes_style_only_when_set() {
        let with_style = SubmitRequest::new(
            Identity::from_raw(1),
            "mureka",
            MediaInput::Music {
                lyrics: "la la".to_string(),
                style: Some("lo-fi".to_string()),
            },
        );
        assert_eq!(with_style.payload()["style"], json!("lo-fi"));

        let blank_style = SubmitRequest::new(
            Identity::from_raw(1),
            "mureka",
            MediaInput::Music {
                lyrics: "la la".to_string(),
                style: Some("  ".to_string()),
            },
        );
        assert!(blank_style.payload().get("style").is_none());
        assert_eq!(blank_style.payload()["lyrics"], json!("la la"));
    }

    #[test]
    fn anonymous_sends_zero_id() {
        let req = SubmitRequest::new(
            Identity::anonymous(),
            "m",
            MediaInput::Image {
                prompt: "cat".to_string(),
            },
        );
        assert_eq!(req.payload()["tg_id"], json!(0));
        assert_eq!(req.payload()["prompt"], json!("cat"));
    }

    #[test]
    fn blank_detection_trims() {
        assert!(MediaInput::Video {
            prompt: " \n\t".to_string()
        }
        .is_blank());
        assert!(!MediaInput::Video {
            prompt: " x ".to_string()
        }
        .is_blank());
    }
}
