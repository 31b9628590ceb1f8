//! Normalized pull/merge-request views and request objects.

use super::PipelineStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    /// Open for review.
    Open,
    /// Closed without merging.
    Closed,
    /// Merged into the base branch.
    Merged,
}

impl PullRequestState {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Merged => "merged",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How to merge a pull request, mapped to each provider's native semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMethod {
    /// Squash every commit into one.
    Squash,
    /// Merge commit.
    Merge,
    /// Rebase onto the base branch.
    Rebase,
}

/// Which pull requests to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestFilter {
    /// Only open requests.
    #[default]
    Open,
    /// Only closed (including merged) requests.
    Closed,
    /// Everything.
    All,
}

/// One pull/merge request in the provider-agnostic shape.
///
/// Provider-specific response fields are translated at the adapter boundary
/// and never leak past this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Provider-assigned request number (merge-request iid on the
    /// merge-request provider).
    pub number: u64,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Lifecycle state.
    pub state: PullRequestState,
    /// Whether the request is a draft.
    pub draft: bool,
    /// Source branch.
    pub head_branch: String,
    /// Target branch.
    pub base_branch: String,
    /// Whether the request has been merged.
    pub merged: bool,
    /// Labels on the request.
    pub labels: Vec<String>,
    /// Link to the request.
    pub url: Option<String>,
    /// CI status, when the provider embeds it in the request payload.
    pub ci_status: Option<PipelineStatus>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last-update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parameters for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullRequest {
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Source branch.
    pub head_branch: String,
    /// Target branch.
    pub base_branch: String,
    /// Open as a draft.
    pub draft: bool,
    /// Labels to apply.
    pub labels: Vec<String>,
    /// Reviewers to request.
    pub reviewers: Vec<String>,
    /// Assignees to set.
    pub assignees: Vec<String>,
}

impl CreatePullRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        head_branch: impl Into<String>,
        base_branch: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            head_branch: head_branch.into(),
            base_branch: base_branch.into(),
            draft: false,
            labels: Vec::new(),
            reviewers: Vec::new(),
            assignees: Vec::new(),
        }
    }

    /// Opens the request as a draft.
    #[must_use]
    pub const fn as_draft(mut self) -> Self {
        self.draft = true;
        self
    }

    /// Sets labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Sets reviewers.
    #[must_use]
    pub fn with_reviewers(mut self, reviewers: impl IntoIterator<Item = String>) -> Self {
        self.reviewers = reviewers.into_iter().collect();
        self
    }

    /// Sets assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = String>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }
}

/// Title/body changes to an existing pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePullRequest {
    /// New title, when present.
    pub title: Option<String>,
    /// New body, when present.
    pub body: Option<String>,
}

impl UpdatePullRequest {
    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}
