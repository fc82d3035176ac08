//! User identity supplied by the host environment.

use std::fmt;

/// Opaque numeric user id. `0` (or no id at all) means the host did not
/// provide one; the client keeps working and lets the server reject requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Identity(Option<i64>);

impl Identity {
    pub fn from_raw(id: i64) -> Self {
        if id == 0 {
            Identity(None)
        } else {
            Identity(Some(id))
        }
    }

    pub fn from_option(id: Option<i64>) -> Self {
        id.map(Identity::from_raw).unwrap_or_default()
    }

    pub fn anonymous() -> Self {
        Identity(None)
    }

    pub fn id(self) -> Option<i64> {
        self.0
    }

    pub fn is_anonymous(self) -> bool {
        self.0.is_none()
    }

    /// Value sent as `tg_id`; anonymous is the `0` sentinel.
    pub fn wire_id(self) -> i64 {
        self.0.unwrap_or(0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{}", id),
            None => f.write_str("anonymous"),
        }
    }
}
