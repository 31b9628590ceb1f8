//! Append-only log entries kept on a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the entry was recorded.
    pub at: DateTime<Utc>,
    /// Entry text.
    pub message: String,
}

impl LogEntry {
    /// Creates an entry at the given instant.
    #[must_use]
    pub fn new(message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            at,
            message: message.into(),
        }
    }
}
