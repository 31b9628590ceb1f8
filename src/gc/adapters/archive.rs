//! Shipped archive-store adapters.

use crate::engine::domain::ExecutionEnvironment;
use crate::gc::ports::{ArchiveError, ArchiveStore};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Default archive backend: records the would-be backup in the log.
///
/// No durable storage is wired in; embedders supply their own
/// [`ArchiveStore`] when backups must survive.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyArchiveStore;

impl LogOnlyArchiveStore {
    /// Creates the log-only store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArchiveStore for LogOnlyArchiveStore {
    async fn archive(&self, environment: &ExecutionEnvironment) -> Result<(), ArchiveError> {
        info!(
            environment = %environment.id,
            run_id = environment.run_id().unwrap_or("<none>"),
            "would archive run state before deletion"
        );
        Ok(())
    }
}

/// In-memory archive backend for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArchiveStore {
    state: Arc<RwLock<InMemoryArchiveState>>,
}

#[derive(Debug, Default)]
struct InMemoryArchiveState {
    archived: Vec<ExecutionEnvironment>,
    fail_next: bool,
}

impl InMemoryArchiveStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent archive call fail, for failure-path tests.
    pub fn fail_archives(&self) {
        if let Ok(mut state) = self.state.write() {
            state.fail_next = true;
        }
    }

    /// Returns the snapshots archived so far.
    #[must_use]
    pub fn archived(&self) -> Vec<ExecutionEnvironment> {
        self.state
            .read()
            .map(|state| state.archived.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ArchiveStore for InMemoryArchiveStore {
    async fn archive(&self, environment: &ExecutionEnvironment) -> Result<(), ArchiveError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| ArchiveError("archive state poisoned".to_owned()))?;
        if state.fail_next {
            return Err(ArchiveError("archive backend unavailable".to_owned()));
        }
        state.archived.push(environment.clone());
        Ok(())
    }
}
