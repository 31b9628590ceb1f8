//! Sweep outcome reporting.

use crate::engine::domain::EnvironmentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One per-environment failure recorded during a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcItemError {
    /// Environment the operation failed on.
    pub id: EnvironmentId,
    /// What went wrong.
    pub message: String,
}

/// Immutable result of one reclaim sweep.
///
/// Produced once per sweep and surfaced to the caller; never persisted by
/// this crate. Per-environment failures land in `errors` — there is no
/// whole-sweep failure outcome short of the process crashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcReport {
    /// Environments removed.
    pub removed: Vec<EnvironmentId>,
    /// Environments archived before removal.
    pub archived: Vec<EnvironmentId>,
    /// Per-environment failures; the sweep continued past each.
    pub errors: Vec<GcItemError>,
    /// When the sweep ran.
    pub swept_at: DateTime<Utc>,
}

impl GcReport {
    /// Creates an empty report stamped with the sweep time.
    #[must_use]
    pub const fn new(swept_at: DateTime<Utc>) -> Self {
        Self {
            removed: Vec::new(),
            archived: Vec::new(),
            errors: Vec::new(),
            swept_at,
        }
    }
}

/// Result of requesting a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    /// The sweep ran; here is what it did.
    Completed(GcReport),
    /// A sweep was already in flight; the request was a no-op.
    AlreadyRunning,
    /// The current policy disables reclaim.
    Disabled,
}

impl SweepOutcome {
    /// Returns the report when the sweep completed.
    #[must_use]
    pub fn report(self) -> Option<GcReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::AlreadyRunning | Self::Disabled => None,
        }
    }
}
