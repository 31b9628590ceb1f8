//! Resource usage snapshots and in-environment command execution values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Point-in-time resource usage for one environment.
///
/// Engines without a stats endpoint report the zeroed default rather than
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentStats {
    /// CPU usage as a percentage of one core.
    pub cpu_percent: f64,
    /// Memory in use, bytes.
    pub memory_used_bytes: u64,
    /// Memory ceiling, bytes (zero when unlimited or unknown).
    pub memory_limit_bytes: u64,
    /// Cumulative block-device reads, bytes.
    pub disk_read_bytes: u64,
    /// Cumulative block-device writes, bytes.
    pub disk_write_bytes: u64,
    /// Cumulative network receive, bytes.
    pub network_rx_bytes: u64,
    /// Cumulative network transmit, bytes.
    pub network_tx_bytes: u64,
    /// Number of processes in the environment.
    pub pids: u64,
}

/// Parameters for running a command inside a running environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    /// Command and arguments.
    pub command: Vec<String>,
    /// Extra environment variables for the command.
    pub env: BTreeMap<String, String>,
    /// Working directory for the command, if not the environment default.
    pub working_dir: Option<String>,
    /// Wall-clock ceiling; the child is killed on expiry.
    pub timeout: Option<Duration>,
}

impl ExecRequest {
    /// Creates a request for the given command.
    #[must_use]
    pub fn new(command: impl IntoIterator<Item = String>) -> Self {
        Self {
            command: command.into_iter().collect(),
            env: BTreeMap::new(),
            working_dir: None,
            timeout: None,
        }
    }

    /// Adds one environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Sets the wall-clock ceiling.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Captured result of an in-environment command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Process exit code.
    pub exit_code: i64,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ExecOutput {
    /// Returns true when the command exited zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}
