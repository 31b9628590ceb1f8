//! Execution environment snapshot and identifier types.

use super::EnvironmentStatus;
use super::labels;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Engine-assigned opaque identifier for an execution environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentId(String);

impl EnvironmentId {
    /// Wraps an engine-assigned identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EnvironmentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EnvironmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-assigned environment name, unique per engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    /// Wraps a caller-assigned environment name.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EnvironmentName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time view of one engine-managed execution environment.
///
/// Produced by adapters normalizing whatever the engine's list/inspect
/// output contains. The snapshot is a value: holding one confers no
/// ownership over the underlying environment, which the engine mutates and
/// reclaims independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionEnvironment {
    /// Engine-assigned identifier.
    pub id: EnvironmentId,
    /// Caller-assigned name.
    pub name: EnvironmentName,
    /// Image reference the environment was created from.
    pub image: String,
    /// Lifecycle status at snapshot time.
    pub status: EnvironmentStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent process start, if any.
    pub started_at: Option<DateTime<Utc>>,
    /// Timestamp of the most recent process exit, if any.
    pub finished_at: Option<DateTime<Utc>>,
    /// Exit code of the most recent process exit, if any.
    pub exit_code: Option<i64>,
    /// Label map used for ownership and reclaim metadata.
    pub labels: BTreeMap<String, String>,
}

impl ExecutionEnvironment {
    /// Returns the most recent activity timestamp.
    ///
    /// Finish time when present, otherwise start time, otherwise creation
    /// time. Reclaim sweeps order environments by this value.
    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.finished_at
            .or(self.started_at)
            .unwrap_or(self.created_at)
    }

    /// Returns true when the environment carries this system's ownership label.
    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.labels
            .get(labels::MANAGED)
            .is_some_and(|value| value == labels::MANAGED_VALUE)
    }

    /// Returns the owning run identifier label, if present.
    #[must_use]
    pub fn run_id(&self) -> Option<&str> {
        self.labels.get(labels::RUN_ID).map(String::as_str)
    }

    /// Returns the recorded run outcome label, if present.
    #[must_use]
    pub fn run_status(&self) -> Option<&str> {
        self.labels.get(labels::RUN_STATUS).map(String::as_str)
    }

    /// Returns the owning user label, if present.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.labels.get(labels::USER).map(String::as_str)
    }
}
