//! Adapter for the merge-request-based hosting provider's REST API.

use super::http::{label_names, optional_str, required_str, required_u64, send_json, timestamp};
use crate::provider::domain::{
    AuthenticatedUser, CreatePullRequest, GitBranch, GitCommit, MergeMethod, PipelineRun,
    PipelineStatus, ProviderCredentials, ProviderError, ProviderKind, ProviderResult, PullRequest,
    PullRequestFilter, PullRequestState, UpdatePullRequest,
};
use crate::provider::ports::GitProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

/// Default API root.
const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4";
/// Title prefix marking a draft merge request.
const DRAFT_PREFIX: &str = "Draft: ";

/// Repository-scoped client for the merge-request-based provider.
pub struct GitlabProvider {
    client: Client,
    base_url: String,
    repository: String,
    credentials: ProviderCredentials,
}

impl GitlabProvider {
    /// Creates a client scoped to the `owner/repo` project path.
    #[must_use]
    pub fn new(repository: impl Into<String>, credentials: ProviderCredentials) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            repository: repository.into(),
            credentials,
        }
    }

    /// Overrides the API root, for self-hosted installations and tests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The project path, URL-encoded the way the provider expects.
    fn project_path(&self) -> String {
        self.repository.replace('/', "%2F")
    }

    fn project_url(&self, path: &str) -> String {
        format!("{}/projects/{}{path}", self.base_url, self.project_path())
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("PRIVATE-TOKEN", self.credentials.token())
    }

    async fn get(&self, url: String) -> ProviderResult<Value> {
        send_json(self.authorized(self.client.get(url))).await
    }

    async fn post(&self, url: String, body: Value) -> ProviderResult<Value> {
        send_json(self.authorized(self.client.post(url)).json(&body)).await
    }

    async fn put(&self, url: String, body: Value) -> ProviderResult<Value> {
        send_json(self.authorized(self.client.put(url)).json(&body)).await
    }
}

#[async_trait]
impl GitProvider for GitlabProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitLab
    }

    async fn authenticate(
        &self,
        credentials: &ProviderCredentials,
    ) -> ProviderResult<AuthenticatedUser> {
        let request = self
            .client
            .get(format!("{}/user", self.base_url))
            .header("PRIVATE-TOKEN", credentials.token());
        let user = send_json(request).await?;
        Ok(AuthenticatedUser {
            login: required_str(&user, "username")?,
            name: optional_str(&user, "name"),
        })
    }

    async fn validate_credentials(&self) -> bool {
        self.authenticate(&self.credentials).await.is_ok()
    }

    async fn create_branch(&self, name: &str, from_branch: &str) -> ProviderResult<GitBranch> {
        let created = self
            .post(
                self.project_url(&format!(
                    "/repository/branches?branch={name}&ref={from_branch}"
                )),
                Value::Null,
            )
            .await?;
        map_branch(&created)
    }

    async fn delete_branch(&self, name: &str) -> ProviderResult<()> {
        let url = self.project_url(&format!("/repository/branches/{name}"));
        send_json(self.authorized(self.client.delete(url))).await?;
        Ok(())
    }

    async fn list_branches(&self) -> ProviderResult<Vec<GitBranch>> {
        let listed = self.get(self.project_url("/repository/branches")).await?;
        let entries = listed
            .as_array()
            .ok_or_else(|| ProviderError::UnexpectedPayload("branch list is not an array".to_owned()))?;
        entries.iter().map(map_branch).collect()
    }

    async fn list_commits(&self, branch: &str) -> ProviderResult<Vec<GitCommit>> {
        let listed = self
            .get(self.project_url(&format!("/repository/commits?ref_name={branch}")))
            .await?;
        let entries = listed
            .as_array()
            .ok_or_else(|| ProviderError::UnexpectedPayload("commit list is not an array".to_owned()))?;
        entries.iter().map(map_commit).collect()
    }

    async fn get_commit(&self, sha: &str) -> ProviderResult<GitCommit> {
        let commit = self
            .get(self.project_url(&format!("/repository/commits/{sha}")))
            .await?;
        map_commit(&commit)
    }

    async fn create_pull_request(
        &self,
        request: &CreatePullRequest,
    ) -> ProviderResult<PullRequest> {
        if !request.reviewers.is_empty() || !request.assignees.is_empty() {
            // This provider keys reviewers/assignees by numeric user id, not
            // login, so usernames cannot be forwarded without a lookup.
            debug!("reviewers/assignees by username are not forwarded to this provider");
        }
        let title = if request.draft && !request.title.starts_with(DRAFT_PREFIX) {
            format!("{DRAFT_PREFIX}{}", request.title)
        } else {
            request.title.clone()
        };
        let created = self
            .post(
                self.project_url("/merge_requests"),
                json!({
                    "source_branch": request.head_branch,
                    "target_branch": request.base_branch,
                    "title": title,
                    "description": request.body,
                    "labels": request.labels.join(","),
                }),
            )
            .await?;
        map_merge_request(&created)
    }

    async fn get_pull_request(&self, number: u64) -> ProviderResult<PullRequest> {
        let fetched = self
            .get(self.project_url(&format!("/merge_requests/{number}")))
            .await?;
        map_merge_request(&fetched)
    }

    async fn update_pull_request(
        &self,
        number: u64,
        update: &UpdatePullRequest,
    ) -> ProviderResult<PullRequest> {
        let mut body = serde_json::Map::new();
        if let Some(title) = &update.title {
            body.insert("title".to_owned(), Value::String(title.clone()));
        }
        if let Some(text) = &update.body {
            body.insert("description".to_owned(), Value::String(text.clone()));
        }
        let updated = self
            .put(
                self.project_url(&format!("/merge_requests/{number}")),
                Value::Object(body),
            )
            .await?;
        map_merge_request(&updated)
    }

    async fn merge_pull_request(
        &self,
        number: u64,
        method: MergeMethod,
    ) -> ProviderResult<PullRequest> {
        if method == MergeMethod::Rebase {
            // Native rebase-then-merge: rebase the source branch first.
            self.put(
                self.project_url(&format!("/merge_requests/{number}/rebase")),
                Value::Null,
            )
            .await?;
        }
        let merged = self
            .put(
                self.project_url(&format!("/merge_requests/{number}/merge")),
                json!({ "squash": method == MergeMethod::Squash }),
            )
            .await?;
        map_merge_request(&merged)
    }

    async fn close_pull_request(&self, number: u64) -> ProviderResult<PullRequest> {
        let closed = self
            .put(
                self.project_url(&format!("/merge_requests/{number}")),
                json!({ "state_event": "close" }),
            )
            .await?;
        map_merge_request(&closed)
    }

    async fn list_pull_requests(
        &self,
        filter: PullRequestFilter,
    ) -> ProviderResult<Vec<PullRequest>> {
        let state = match filter {
            PullRequestFilter::Open => "opened",
            PullRequestFilter::Closed => "closed",
            PullRequestFilter::All => "all",
        };
        let listed = self
            .get(self.project_url(&format!("/merge_requests?state={state}")))
            .await?;
        let entries = listed
            .as_array()
            .ok_or_else(|| ProviderError::UnexpectedPayload("merge-request list is not an array".to_owned()))?;
        entries.iter().map(map_merge_request).collect()
    }

    async fn trigger_pipeline(&self, branch: &str) -> ProviderResult<PipelineRun> {
        let created = self
            .post(self.project_url("/pipeline"), json!({ "ref": branch }))
            .await?;
        map_pipeline(&created)
    }

    async fn get_pipeline_status(&self, pipeline_id: u64) -> ProviderResult<PipelineStatus> {
        let pipeline = self
            .get(self.project_url(&format!("/pipelines/{pipeline_id}")))
            .await?;
        Ok(pipeline_status(
            pipeline.get("status").and_then(Value::as_str).unwrap_or(""),
        ))
    }
}

/// Maps one merge-request payload into the provider-agnostic shape.
///
/// CI state comes from the embedded `head_pipeline` object; there is no
/// separate status query on the read path for this provider.
pub(crate) fn map_merge_request(payload: &Value) -> ProviderResult<PullRequest> {
    let native_state = required_str(payload, "state")?;
    let state = match native_state.as_str() {
        "merged" => PullRequestState::Merged,
        "closed" => PullRequestState::Closed,
        // "opened" and "locked" both present as open.
        _ => PullRequestState::Open,
    };
    let title = required_str(payload, "title")?;
    let draft = payload
        .get("draft")
        .and_then(Value::as_bool)
        .unwrap_or_else(|| title.starts_with(DRAFT_PREFIX));

    Ok(PullRequest {
        number: required_u64(payload, "iid")?,
        title,
        body: optional_str(payload, "description").unwrap_or_default(),
        state,
        draft,
        head_branch: optional_str(payload, "source_branch").unwrap_or_default(),
        base_branch: optional_str(payload, "target_branch").unwrap_or_default(),
        merged: state == PullRequestState::Merged,
        labels: label_names(payload, "labels"),
        url: optional_str(payload, "web_url"),
        ci_status: payload
            .get("head_pipeline")
            .filter(|pipeline| !pipeline.is_null())
            .and_then(|pipeline| pipeline.get("status"))
            .and_then(Value::as_str)
            .map(pipeline_status),
        created_at: timestamp(payload, "created_at"),
        updated_at: timestamp(payload, "updated_at"),
    })
}

/// Maps one branch payload; the default flag is embedded on this provider.
pub(crate) fn map_branch(payload: &Value) -> ProviderResult<GitBranch> {
    Ok(GitBranch {
        name: required_str(payload, "name")?,
        head_sha: payload
            .get("commit")
            .and_then(|commit| commit.get("id"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        is_default: payload
            .get("default")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        protected: payload
            .get("protected")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Maps one commit payload.
pub(crate) fn map_commit(payload: &Value) -> ProviderResult<GitCommit> {
    Ok(GitCommit {
        sha: required_str(payload, "id")?,
        message: optional_str(payload, "message")
            .or_else(|| optional_str(payload, "title"))
            .unwrap_or_default(),
        author: optional_str(payload, "author_name").unwrap_or_default(),
        authored_at: timestamp(payload, "created_at"),
    })
}

/// Maps one pipeline payload.
pub(crate) fn map_pipeline(payload: &Value) -> ProviderResult<PipelineRun> {
    Ok(PipelineRun {
        id: required_u64(payload, "id")?,
        status: pipeline_status(
            payload.get("status").and_then(Value::as_str).unwrap_or(""),
        ),
        git_ref: optional_str(payload, "ref").unwrap_or_default(),
        url: optional_str(payload, "web_url"),
    })
}

/// Maps this provider's pipeline status vocabulary onto the shared enum.
pub(crate) fn pipeline_status(native: &str) -> PipelineStatus {
    match native {
        "running" => PipelineStatus::Running,
        "success" => PipelineStatus::Success,
        "failed" => PipelineStatus::Failure,
        "canceled" | "cancelled" => PipelineStatus::Cancelled,
        "skipped" | "manual" | "scheduled" => PipelineStatus::Skipped,
        // created, waiting_for_resource, preparing, pending, …
        _ => PipelineStatus::Pending,
    }
}
