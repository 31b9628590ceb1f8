//! Archive-before-delete extension point.

use crate::engine::domain::ExecutionEnvironment;
use async_trait::async_trait;
use thiserror::Error;

/// Error returned by archive backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("archive failed: {0}")]
pub struct ArchiveError(pub String);

/// Storage capability the reclaim engine depends on but does not implement.
///
/// Before deleting an environment that belongs to a run, the sweep offers
/// its snapshot here. Archival is strictly best-effort: a failure is logged
/// by the caller and never blocks reclaiming the resource. Durable formats
/// and destinations are the embedder's decision.
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// Archives whatever progress artifact exists for the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] when the backend cannot take the snapshot.
    async fn archive(&self, environment: &ExecutionEnvironment) -> Result<(), ArchiveError>;
}
