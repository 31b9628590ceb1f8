//! Normalized branch and commit views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository branch, as listed by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitBranch {
    /// Branch name.
    pub name: String,
    /// SHA of the branch head commit.
    pub head_sha: String,
    /// Whether this is the repository's default branch.
    pub is_default: bool,
    /// Whether the provider protects the branch.
    pub protected: bool,
}

/// One commit, as returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCommit {
    /// Commit SHA.
    pub sha: String,
    /// Full commit message.
    pub message: String,
    /// Author name.
    pub author: String,
    /// Author timestamp, when the provider exposes one.
    pub authored_at: Option<DateTime<Utc>>,
}
