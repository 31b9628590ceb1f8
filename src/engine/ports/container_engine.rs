//! Execution backend contract.

use crate::engine::domain::{
    EngineResult, EnvironmentConfig, EnvironmentFilter, EnvironmentId, EnvironmentStats,
    ExecOutput, ExecRequest, ExecutionEnvironment,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which execution backend an engine instance drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// The general Linux/Windows/macOS container engine.
    Docker,
    /// The drop-in compatible daemonless engine.
    Podman,
    /// The lightweight-VM engine shipped with macOS on Apple silicon.
    AppleContainer,
    /// The in-process engine used for tests and embedding.
    InMemory,
}

impl EngineKind {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Podman => "podman",
            Self::AppleContainer => "apple-container",
            Self::InMemory => "in-memory",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform contract over heterogeneous container engines.
///
/// Every backend implements these operations identically; callers never see
/// engine-specific vocabulary. A new backend can be added without touching
/// any other component as long as it satisfies this contract and the shared
/// status enum.
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Identifies the backend this instance drives.
    fn kind(&self) -> EngineKind;

    /// Probes whether the engine is usable on this host.
    ///
    /// Never errors; any detection failure reports `false`.
    async fn is_available(&self) -> bool;

    /// Creates an environment from immutable parameters.
    ///
    /// Pulls the image if absent, then issues the engine's create
    /// invocation. The returned snapshot has status `created`, or `running`
    /// for engines that start the process on create.
    ///
    /// # Errors
    ///
    /// Returns [`crate::engine::domain::EngineError::Invocation`] carrying
    /// the engine's stderr when the invocation fails.
    async fn create_container(
        &self,
        config: &EnvironmentConfig,
    ) -> EngineResult<ExecutionEnvironment>;

    /// Starts a created or stopped environment.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::engine::domain::EngineError`] when the engine
    /// invocation fails.
    async fn start_container(&self, id: &EnvironmentId) -> EngineResult<()>;

    /// Stops a running environment.
    ///
    /// The engine waits `timeout` for graceful termination before its own
    /// forced kill.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::engine::domain::EngineError`] when the engine
    /// invocation fails.
    async fn stop_container(&self, id: &EnvironmentId, timeout: Duration) -> EngineResult<()>;

    /// Removes an environment.
    ///
    /// Idempotent: removing an id the engine no longer knows succeeds, so a
    /// manual removal racing a reclaim sweep is a no-op rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::engine::domain::EngineError`] when the engine
    /// invocation fails for any reason other than the id being unknown.
    async fn remove_container(&self, id: &EnvironmentId, force: bool) -> EngineResult<()>;

    /// Lists environments matching the filter.
    ///
    /// Best-effort: invocation failure yields an empty list rather than an
    /// error, because listings feed supervisory sweeps where liveness
    /// matters more than completeness.
    async fn list_containers(&self, filter: &EnvironmentFilter) -> Vec<ExecutionEnvironment>;

    /// Looks up one environment.
    ///
    /// Returns `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::engine::domain::EngineError`] when the engine
    /// invocation itself fails.
    async fn get_container(
        &self,
        id: &EnvironmentId,
    ) -> EngineResult<Option<ExecutionEnvironment>>;

    /// Takes a resource-usage snapshot.
    ///
    /// Engines without a stats endpoint return the zeroed snapshot.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::engine::domain::EngineError`] when the engine
    /// invocation fails.
    async fn get_stats(&self, id: &EnvironmentId) -> EngineResult<EnvironmentStats>;

    /// Runs a command inside a running environment.
    ///
    /// Honours the request's wall-clock ceiling; the child is killed on
    /// expiry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::engine::domain::EngineError::Timeout`] on expiry or
    /// another [`crate::engine::domain::EngineError`] when the invocation
    /// fails.
    async fn exec(&self, id: &EnvironmentId, request: &ExecRequest) -> EngineResult<ExecOutput>;

    /// Pulls an image.
    ///
    /// Idempotent: a no-op success when the image is already present.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::engine::domain::EngineError`] when the pull
    /// fails.
    async fn pull_image(&self, image: &str) -> EngineResult<()>;
}
