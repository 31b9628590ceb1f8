//! Reclaim policy for execution environments.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Policy driving reclaim sweeps.
///
/// Hot-reloadable: the sweep engine reads the latest value at the start of
/// each sweep, so updates take effect on the next sweep and never interrupt
/// one in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcPolicy {
    /// Master switch; a disabled policy makes sweeps no-ops.
    pub enabled: bool,
    /// Remove non-running environments idle longer than this.
    pub max_idle_time: Duration,
    /// Cap on non-running environments kept per user.
    pub max_containers_per_user: usize,
    /// Cap on non-running environments kept per project.
    pub max_containers_per_project: usize,
    /// Disk-usage ceiling in bytes, for embedders' policy tooling.
    pub max_disk_usage_bytes: u64,
    /// Memory-usage ceiling in bytes, for embedders' policy tooling.
    pub max_memory_usage_bytes: u64,
    /// Keep environments of completed runs around this long.
    pub preserve_completed: Duration,
    /// Keep environments of failed runs around this long.
    pub preserve_failed: Duration,
    /// Archive run state before deleting, best-effort.
    pub backup_before_delete: bool,
}

impl Default for GcPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_idle_time: Duration::from_secs(30 * 60),
            max_containers_per_user: 10,
            max_containers_per_project: 20,
            max_disk_usage_bytes: 20 * 1024 * 1024 * 1024,
            max_memory_usage_bytes: 8 * 1024 * 1024 * 1024,
            preserve_completed: Duration::from_secs(24 * 60 * 60),
            preserve_failed: Duration::from_secs(72 * 60 * 60),
            backup_before_delete: true,
        }
    }
}
