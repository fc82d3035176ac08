//! Response body interpretation and error message extraction.

use serde_json::Value;

/// A response body: parsed JSON, or the raw text when it is not JSON.
///
/// Unparsable bodies are not an error at this layer; callers that need a
/// particular shape decide what a `Raw` body means for them.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Parsed(Value),
    Raw(String),
}

impl Body {
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(v) => Body::Parsed(v),
            Err(_) => Body::Raw(text.to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Parsed(v) => Some(v),
            Body::Raw(_) => None,
        }
    }

    /// Message for a non-2xx response, in priority order: `detail`, `error`,
    /// non-empty raw text, then `HTTP <status>`.
    pub fn error_message(&self, status: u32) -> String {
        match self {
            Body::Parsed(v) => ["detail", "error"]
                .iter()
                .filter_map(|field| v.get(*field))
                .find(|value| !value.is_null())
                .map(field_text)
                .unwrap_or_else(|| format!("HTTP {}", status)),
            Body::Raw(text) if !text.trim().is_empty() => text.trim().to_string(),
            Body::Raw(_) => format!("HTTP {}", status),
        }
    }
}

/// Strings are used verbatim; anything else (FastAPI-style structured
/// `detail`) is serialized back to JSON.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Shortens a raw body for inclusion in an error message.
pub(crate) fn snippet(text: &str) -> String {
    const MAX: usize = 200;
    let trimmed = text.trim();
    match trimmed.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
