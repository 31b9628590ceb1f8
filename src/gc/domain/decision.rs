//! Pure per-environment reclaim decision.

use super::GcPolicy;
use crate::engine::domain::{ExecutionEnvironment, labels};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Why an environment was reclaimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReclaimReason {
    /// Idle longer than the policy's idle ceiling.
    Idle,
    /// Its run completed and outlived the completed-retention window.
    CompletedRetention,
    /// Its run failed and outlived the failed-retention window.
    FailedRetention,
    /// Removed to enforce the per-user capacity cap.
    Capacity,
}

impl ReclaimReason {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CompletedRetention => "completed_retention",
            Self::FailedRetention => "failed_retention",
            Self::Capacity => "capacity",
        }
    }
}

impl fmt::Display for ReclaimReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether one environment should be reclaimed.
///
/// Rules are evaluated in order: a running environment is never reclaimed;
/// then the idle ceiling; then the completed- and failed-run retention
/// windows read from the environment's run-status label. The capacity cap
/// is a separate pass over the whole listing and is not decided here.
#[must_use]
pub fn reclaim_decision(
    environment: &ExecutionEnvironment,
    policy: &GcPolicy,
    now: DateTime<Utc>,
) -> Option<ReclaimReason> {
    if environment.status.is_running() {
        return None;
    }

    let age = age_of(environment, now);
    if age > policy.max_idle_time {
        return Some(ReclaimReason::Idle);
    }
    match environment.run_status() {
        Some(labels::RUN_STATUS_COMPLETED) if age > policy.preserve_completed => {
            Some(ReclaimReason::CompletedRetention)
        }
        Some(labels::RUN_STATUS_FAILED) if age > policy.preserve_failed => {
            Some(ReclaimReason::FailedRetention)
        }
        _ => None,
    }
}

/// Time since the environment's last activity; clock skew clamps to zero.
fn age_of(environment: &ExecutionEnvironment, now: DateTime<Utc>) -> Duration {
    now.signed_duration_since(environment.last_activity())
        .to_std()
        .unwrap_or_default()
}
