//! Mapping a finished job's `result` to something displayable.

use serde_json::Value;
use std::fmt;

use super::MediaKind;
use crate::error::Error;

/// Display payload for a completed job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOutput {
    Text(String),
    Image { url: String },
    Video { url: String },
    Audio { url: String },
}

impl MediaOutput {
    /// Chat uses `result.text`, falling back to the pretty-printed result.
    /// Image, video and music require `result.url`.
    pub fn from_result(kind: MediaKind, result: Option<&Value>) -> Result<Self, Error> {
        match kind {
            MediaKind::Chat => {
                let text = result
                    .and_then(|r| r.get("text"))
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty());
                match text {
                    Some(t) => Ok(MediaOutput::Text(t.to_string())),
                    None => {
                        let pretty = match result {
                            Some(r) => serde_json::to_string_pretty(r)
                                .map_err(|e| Error::MalformedResponse(e.to_string()))?,
                            None => "null".to_string(),
                        };
                        Ok(MediaOutput::Text(pretty))
                    }
                }
            }
            MediaKind::Image | MediaKind::Video | MediaKind::Music => {
                let url = result
                    .and_then(|r| r.get("url"))
                    .and_then(Value::as_str)
                    .filter(|u| !u.is_empty())
                    .ok_or_else(|| {
                        Error::MalformedResponse(format!("{} job result has no url", kind))
                    })?
                    .to_string();
                Ok(match kind {
                    MediaKind::Image => MediaOutput::Image { url },
                    MediaKind::Video => MediaOutput::Video { url },
                    _ => MediaOutput::Audio { url },
                })
            }
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            MediaOutput::Text(_) => None,
            MediaOutput::Image { url } | MediaOutput::Video { url } | MediaOutput::Audio { url } => {
                Some(url)
            }
        }
    }
}

impl fmt::Display for MediaOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaOutput::Text(t) => f.write_str(t),
            MediaOutput::Image { url } => write!(f, "Done. Image: {}", url),
            MediaOutput::Video { url } => write!(f, "Done. Video: {}", url),
            MediaOutput::Audio { url } => write!(f, "Done. Audio: {}", url),
        }
    }
}
