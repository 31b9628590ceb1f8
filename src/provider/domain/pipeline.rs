//! Normalized CI pipeline views.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-agnostic CI pipeline status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Queued or waiting on a resource.
    Pending,
    /// Executing.
    Running,
    /// Finished successfully.
    Success,
    /// Finished with a failure.
    Failure,
    /// Cancelled before finishing.
    Cancelled,
    /// Skipped without executing.
    Skipped,
}

impl PipelineStatus {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
            Self::Skipped => "skipped",
        }
    }

    /// Whether the pipeline has finished, in any outcome.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One CI pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Provider-assigned pipeline identifier.
    pub id: u64,
    /// Normalized status.
    pub status: PipelineStatus,
    /// Git ref the pipeline ran for.
    pub git_ref: String,
    /// Link to the pipeline, when the provider exposes one.
    pub url: Option<String>,
}
