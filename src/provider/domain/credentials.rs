//! Provider identity and credential types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A source-control hosting provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// The pull-request-based hosting provider.
    GitHub,
    /// The merge-request-based hosting provider.
    GitLab,
}

impl ProviderKind {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opaque personal-access token.
///
/// This crate never persists or encrypts credentials; storage is the
/// surrounding system's responsibility. The token is excluded from debug
/// output.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    token: String,
}

impl ProviderCredentials {
    /// Wraps a personal-access token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the raw token for request authorization.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// The identity a validated token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Provider login name.
    pub login: String,
    /// Display name, when the provider exposes one.
    pub name: Option<String>,
}
