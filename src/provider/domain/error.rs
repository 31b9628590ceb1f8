//! Error types for source-control provider operations.

use thiserror::Error;

/// Errors returned by provider adapters.
///
/// Adapters never retry: a failed call surfaces immediately and retry
/// policy, if any, belongs to the caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (connect, TLS, timeout).
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    ///
    /// The body is carried verbatim so callers see exactly what the
    /// provider said.
    #[error("provider returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The provider's response body could not be decoded.
    #[error("failed to decode provider response: {0}")]
    Decode(String),

    /// The response decoded but is missing a field this adapter requires.
    #[error("unexpected provider payload: {0}")]
    UnexpectedPayload(String),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
