//! Environment lifecycle status shared by every execution backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an execution environment.
///
/// Transitions are monotonic: `Created → Running → {Paused ⇄ Running} →
/// {Exited, Dead}`. [`Self::Restarting`] and [`Self::Removing`] are
/// transient states surfaced by the engine during start/stop races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentStatus {
    /// The environment exists but its process has not been started.
    Created,
    /// The environment's process is running.
    Running,
    /// The environment's process is suspended and may be resumed.
    Paused,
    /// The engine is restarting the environment.
    Restarting,
    /// The engine is tearing the environment down.
    Removing,
    /// The environment's process has exited.
    Exited,
    /// The engine considers the environment unrecoverable.
    Dead,
}

impl EnvironmentStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Restarting => "restarting",
            Self::Removing => "removing",
            Self::Exited => "exited",
            Self::Dead => "dead",
        }
    }

    /// Returns true when the environment's process is currently running.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Returns true when the environment cannot transition to running again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exited | Self::Dead)
    }

    /// Maps an engine-native status string through a backend's mapping table.
    ///
    /// Matching is case-insensitive on the trimmed input. Unrecognized native
    /// states map to [`Self::Exited`] so an environment in a vocabulary this
    /// crate has never seen still becomes visible to reclaim sweeps.
    #[must_use]
    pub fn from_native(table: &[(&str, Self)], raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        table
            .iter()
            .find(|(native, _)| *native == normalized)
            .map_or(Self::Exited, |(_, status)| *status)
    }
}

impl fmt::Display for EnvironmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
