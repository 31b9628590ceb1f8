//! Source-control provider contract.

use crate::provider::domain::{
    AuthenticatedUser, CreatePullRequest, GitBranch, GitCommit, MergeMethod, PipelineRun,
    PipelineStatus, ProviderCredentials, ProviderKind, ProviderResult, PullRequest,
    PullRequestFilter, UpdatePullRequest,
};
use async_trait::async_trait;

/// Uniform contract over source-control hosting providers.
///
/// Implementations are scoped to one repository at construction time.
/// Adapters perform no retry; a failed call surfaces immediately with the
/// provider's response attached.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitProvider: Send + Sync {
    /// Identifies the hosting provider.
    fn kind(&self) -> ProviderKind;

    /// Validates a personal-access token against the provider's identity
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the token
    /// is rejected or the request fails.
    async fn authenticate(
        &self,
        credentials: &ProviderCredentials,
    ) -> ProviderResult<AuthenticatedUser>;

    /// Re-checks that the configured credentials are still live.
    ///
    /// Never errors; any failure reports `false`.
    async fn validate_credentials(&self) -> bool;

    /// Creates a branch from an existing one.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn create_branch(&self, name: &str, from_branch: &str) -> ProviderResult<GitBranch>;

    /// Deletes a branch.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn delete_branch(&self, name: &str) -> ProviderResult<()>;

    /// Lists branches with their head commits and default-branch flag.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn list_branches(&self) -> ProviderResult<Vec<GitBranch>>;

    /// Lists commits on a branch, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn list_commits(&self, branch: &str) -> ProviderResult<Vec<GitCommit>>;

    /// Fetches one commit.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn get_commit(&self, sha: &str) -> ProviderResult<GitCommit>;

    /// Opens a pull request.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn create_pull_request(
        &self,
        request: &CreatePullRequest,
    ) -> ProviderResult<PullRequest>;

    /// Fetches one pull request.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn get_pull_request(&self, number: u64) -> ProviderResult<PullRequest>;

    /// Updates a pull request's title and/or body.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn update_pull_request(
        &self,
        number: u64,
        update: &UpdatePullRequest,
    ) -> ProviderResult<PullRequest>;

    /// Merges a pull request with the given method, mapped to the
    /// provider's native merge semantics.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the merge.
    async fn merge_pull_request(
        &self,
        number: u64,
        method: MergeMethod,
    ) -> ProviderResult<PullRequest>;

    /// Closes a pull request without merging.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn close_pull_request(&self, number: u64) -> ProviderResult<PullRequest>;

    /// Lists pull requests by state.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn list_pull_requests(
        &self,
        filter: PullRequestFilter,
    ) -> ProviderResult<Vec<PullRequest>>;

    /// Triggers a CI pipeline for a branch.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn trigger_pipeline(&self, branch: &str) -> ProviderResult<PipelineRun>;

    /// Polls the status of a pipeline run.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::provider::domain::ProviderError`] when the
    /// provider rejects the request.
    async fn get_pipeline_status(&self, pipeline_id: u64) -> ProviderResult<PipelineStatus>;
}
