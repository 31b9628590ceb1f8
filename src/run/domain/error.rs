//! Error types for the run domain.

use super::{RunId, RunStatus};
use thiserror::Error;

/// Errors returned by run lifecycle mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunDomainError {
    /// The requested state transition is not allowed.
    #[error("invalid run transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: RunStatus,
        /// Requested state.
        to: RunStatus,
    },

    /// An environment is already bound to the run.
    #[error("run {0} already has a bound environment")]
    EnvironmentAlreadyBound(RunId),

    /// The iteration ceiling has been reached.
    #[error("iteration limit of {0} reached")]
    IterationLimitReached(u32),
}
