//! Error types for execution backend operations.

use super::EnvironmentId;
use thiserror::Error;

/// Errors returned by execution backend adapters.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine binary is missing or the platform is unsupported.
    #[error("engine '{engine}' is not available on this host")]
    Unavailable {
        /// Engine that failed the availability probe.
        engine: &'static str,
    },

    /// The engine binary could not be spawned.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        /// Command line that failed to spawn.
        command: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The engine invocation exited non-zero.
    #[error("'{command}' exited with status {status}: {stderr}")]
    Invocation {
        /// Command line that failed.
        command: String,
        /// Exit status reported by the engine binary.
        status: i64,
        /// Captured standard error, verbatim.
        stderr: String,
    },

    /// The invocation exceeded its wall-clock ceiling.
    #[error("'{command}' timed out after {seconds}s")]
    Timeout {
        /// Command line that timed out.
        command: String,
        /// Ceiling that was exceeded, in seconds.
        seconds: u64,
    },

    /// The engine produced output this adapter could not interpret.
    #[error("unexpected engine output: {reason}")]
    UnexpectedOutput {
        /// What was wrong with the output.
        reason: String,
    },

    /// An operation required an environment that does not exist.
    #[error("environment not found: {0}")]
    NotFound(EnvironmentId),
}

/// Result type for execution backend operations.
pub type EngineResult<T> = Result<T, EngineError>;
