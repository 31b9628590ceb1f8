//! Orchestration services for runs.

mod coordinator;

pub use coordinator::{RunCoordinator, RunCoordinatorError, RunCoordinatorResult, RunOptions};
