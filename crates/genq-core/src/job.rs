//! Types describing a server-side generation job as seen by the client.
//!
//! Jobs are created by a submission call and only ever observed afterwards;
//! the client never mutates or deletes them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque job identifier assigned by the server.
///
/// The wire value may be a JSON number or string. It is kept as text and
/// used verbatim when building result paths; serializing writes back the
/// same JSON type the server sent. Equality and hashing look at the text only.
#[derive(Debug, Clone)]
pub struct JobId {
    text: String,
    numeric: bool,
}

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the id arrived (or was built) as a JSON number.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

impl PartialEq for JobId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for JobId {}

impl Hash for JobId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        JobId::from(s.to_string())
    }
}

impl From<String> for JobId {
    fn from(text: String) -> Self {
        JobId {
            text,
            numeric: false,
        }
    }
}

impl From<i64> for JobId {
    fn from(n: i64) -> Self {
        JobId {
            text: n.to_string(),
            numeric: true,
        }
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Num(serde_json::Number),
            Text(String),
        }
        Ok(match Wire::deserialize(deserializer)? {
            Wire::Num(n) => JobId {
                text: n.to_string(),
                numeric: true,
            },
            Wire::Text(s) => JobId::from(s),
        })
    }
}

impl Serialize for JobId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(n) = self.text.parse::<serde_json::Number>() {
                return n.serialize(serializer);
            }
        }
        serializer.serialize_str(&self.text)
    }
}

/// Job status label. Only `Done` and `Error` are terminal; every other label,
/// including ones this client does not know, means "keep waiting".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Pending,
    Running,
    Done,
    Error,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
            JobStatus::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "queued" => JobStatus::Queued,
            "pending" => JobStatus::Pending,
            "running" => JobStatus::Running,
            "done" => JobStatus::Done,
            "error" => JobStatus::Error,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(JobStatus::parse(&s))
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Snapshot of a job returned by the result endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    /// Present once `status` is `done`; shape depends on the media kind.
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Present once `status` is `error`.
    #[serde(default)]
    pub error: Option<String>,
    /// Media kind echoed by the server (`type` on the wire).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl Job {
    /// A bare snapshot with only id and status, as a scripted server would send.
    pub fn new(id: impl Into<JobId>, status: JobStatus) -> Self {
        Self {
            id: id.into(),
            status,
            result: None,
            error: None,
            kind: None,
            model: None,
            prompt: None,
        }
    }
}
