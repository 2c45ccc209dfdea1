//! Request correlation ids.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Header that carries the id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Unique id for one outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new request ID: `req_<nanos>-<pid>-<sequence>`, all hex.
    pub fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!(
            "req_{:x}-{:x}-{:x}",
            nanos,
            std::process::id(),
            seq
        ))
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
