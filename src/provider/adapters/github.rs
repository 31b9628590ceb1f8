//! Adapter for the pull-request-based hosting provider's REST API.

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
const DEFAULT_BASE_URL: &str = "https://api.github.com";
/// Workflow file dispatched by [`GitProvider::trigger_pipeline`].
const DEFAULT_WORKFLOW_FILE: &str = "ci.yml";
/// The provider requires a user agent on every request.
const USER_AGENT: &str = concat!("stevedore/", env!("CARGO_PKG_VERSION"));

/// Repository-scoped client for the pull-request-based provider.
pub struct GithubProvider {
    client: Client,
    base_url: String,
    repository: String,
    credentials: ProviderCredentials,
    workflow_file: String,
}

impl GithubProvider {
    /// Creates a client scoped to `owner/repo`.
    #[must_use]
    pub fn new(repository: impl Into<String>, credentials: ProviderCredentials) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            repository: repository.into(),
            credentials,
            workflow_file: DEFAULT_WORKFLOW_FILE.to_owned(),
        }
    }

    /// Overrides the API root, for self-hosted installations and tests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the workflow file dispatched for CI runs.
    #[must_use]
    pub fn with_workflow_file(mut self, workflow_file: impl Into<String>) -> Self {
        self.workflow_file = workflow_file.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn repo_url(&self, path: &str) -> String {
        format!("{}/repos/{}{path}", self.base_url, self.repository)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(self.credentials.token())
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
    }

    async fn get(&self, url: String) -> ProviderResult<Value> {
        send_json(self.authorized(self.client.get(url))).await
    }

    async fn post(&self, url: String, body: Value) -> ProviderResult<Value> {
        send_json(self.authorized(self.client.post(url)).json(&body)).await
    }

    async fn patch(&self, url: String, body: Value) -> ProviderResult<Value> {
        send_json(self.authorized(self.client.patch(url)).json(&body)).await
    }

    async fn default_branch(&self) -> ProviderResult<String> {
        let repo = self.get(self.repo_url("")).await?;
        required_str(&repo, "default_branch")
    }

    /// Applies labels, assignees, and reviewers after request creation.
    async fn apply_create_extras(
        &self,
        number: u64,
        request: &CreatePullRequest,
    ) -> ProviderResult<()> {
        if !request.labels.is_empty() {
            let url = self.repo_url(&format!("/issues/{number}/labels"));
            self.post(url, json!({ "labels": request.labels })).await?;
        }
        if !request.assignees.is_empty() {
            let url = self.repo_url(&format!("/issues/{number}/assignees"));
            self.post(url, json!({ "assignees": request.assignees }))
                .await?;
        }
        if !request.reviewers.is_empty() {
            let url = self.repo_url(&format!("/pulls/{number}/requested_reviewers"));
            self.post(url, json!({ "reviewers": request.reviewers }))
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl GitProvider for GithubProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitHub
    }

    async fn authenticate(
        &self,
        credentials: &ProviderCredentials,
    ) -> ProviderResult<AuthenticatedUser> {
        let request = self
            .client
            .get(self.url("/user"))
            .bearer_auth(credentials.token())
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT);
        let user = send_json(request).await?;
        Ok(AuthenticatedUser {
            login: required_str(&user, "login")?,
            name: optional_str(&user, "name"),
        })
    }

    async fn validate_credentials(&self) -> bool {
        self.authenticate(&self.credentials).await.is_ok()
    }

    async fn create_branch(&self, name: &str, from_branch: &str) -> ProviderResult<GitBranch> {
        let head = self
            .get(self.repo_url(&format!("/git/ref/heads/{from_branch}")))
            .await?;
        let sha = head
            .get("object")
            .and_then(|object| object.get("sha"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ProviderError::UnexpectedPayload("branch ref is missing 'object.sha'".to_owned())
            })?
            .to_owned();

        self.post(
            self.repo_url("/git/refs"),
            json!({ "ref": format!("refs/heads/{name}"), "sha": sha }),
        )
        .await?;
        Ok(GitBranch {
            name: name.to_owned(),
            head_sha: sha,
            is_default: false,
            protected: false,
        })
    }

    async fn delete_branch(&self, name: &str) -> ProviderResult<()> {
        let url = self.repo_url(&format!("/git/refs/heads/{name}"));
        send_json(self.authorized(self.client.delete(url))).await?;
        Ok(())
    }

    async fn list_branches(&self) -> ProviderResult<Vec<GitBranch>> {
        let default = self.default_branch().await?;
        let listed = self.get(self.repo_url("/branches")).await?;
        let entries = listed
            .as_array()
            .ok_or_else(|| ProviderError::UnexpectedPayload("branch list is not an array".to_owned()))?;
        entries
            .iter()
            .map(|entry| map_branch(entry, &default))
            .collect()
    }

    async fn list_commits(&self, branch: &str) -> ProviderResult<Vec<GitCommit>> {
        let listed = self
            .get(self.repo_url(&format!("/commits?sha={branch}")))
            .await?;
        let entries = listed
            .as_array()
            .ok_or_else(|| ProviderError::UnexpectedPayload("commit list is not an array".to_owned()))?;
        entries.iter().map(map_commit).collect()
    }

    async fn get_commit(&self, sha: &str) -> ProviderResult<GitCommit> {
        let commit = self.get(self.repo_url(&format!("/commits/{sha}"))).await?;
        map_commit(&commit)
    }

    async fn create_pull_request(
        &self,
        request: &CreatePullRequest,
    ) -> ProviderResult<PullRequest> {
        let created = self
            .post(
                self.repo_url("/pulls"),
                json!({
                    "title": request.title,
                    "body": request.body,
                    "head": request.head_branch,
                    "base": request.base_branch,
                    "draft": request.draft,
                }),
            )
            .await?;
        let number = required_u64(&created, "number")?;

        let needs_extras = !request.labels.is_empty()
            || !request.assignees.is_empty()
            || !request.reviewers.is_empty();
        if needs_extras {
            self.apply_create_extras(number, request).await?;
            return self.get_pull_request(number).await;
        }
        map_pull_request(&created)
    }

    async fn get_pull_request(&self, number: u64) -> ProviderResult<PullRequest> {
        let fetched = self.get(self.repo_url(&format!("/pulls/{number}"))).await?;
        map_pull_request(&fetched)
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
            body.insert("body".to_owned(), Value::String(text.clone()));
        }
        let updated = self
            .patch(self.repo_url(&format!("/pulls/{number}")), Value::Object(body))
            .await?;
        map_pull_request(&updated)
    }

    async fn merge_pull_request(
        &self,
        number: u64,
        method: MergeMethod,
    ) -> ProviderResult<PullRequest> {
        let native_method = match method {
            MergeMethod::Squash => "squash",
            MergeMethod::Merge => "merge",
            MergeMethod::Rebase => "rebase",
        };
        let url = self.repo_url(&format!("/pulls/{number}/merge"));
        send_json(
            self.authorized(self.client.put(url))
                .json(&json!({ "merge_method": native_method })),
        )
        .await?;
        self.get_pull_request(number).await
    }

    async fn close_pull_request(&self, number: u64) -> ProviderResult<PullRequest> {
        let closed = self
            .patch(
                self.repo_url(&format!("/pulls/{number}")),
                json!({ "state": "closed" }),
            )
            .await?;
        map_pull_request(&closed)
    }

    async fn list_pull_requests(
        &self,
        filter: PullRequestFilter,
    ) -> ProviderResult<Vec<PullRequest>> {
        let state = match filter {
            PullRequestFilter::Open => "open",
            PullRequestFilter::Closed => "closed",
            PullRequestFilter::All => "all",
        };
        let listed = self.get(self.repo_url(&format!("/pulls?state={state}"))).await?;
        let entries = listed
            .as_array()
            .ok_or_else(|| ProviderError::UnexpectedPayload("pull list is not an array".to_owned()))?;
        entries.iter().map(map_pull_request).collect()
    }

    async fn trigger_pipeline(&self, branch: &str) -> ProviderResult<PipelineRun> {
        let dispatch_url = self.repo_url(&format!(
            "/actions/workflows/{}/dispatches",
            self.workflow_file
        ));
        self.post(dispatch_url, json!({ "ref": branch })).await?;

        // The dispatch endpoint returns no body; surface the newest run for
        // this branch so callers have an id to poll. A dispatch may not be
        // listed yet, in which case a pending placeholder is returned.
        let runs = self
            .get(self.repo_url(&format!("/actions/runs?branch={branch}&per_page=1")))
            .await?;
        let newest = runs
            .get("workflow_runs")
            .and_then(Value::as_array)
            .and_then(|entries| entries.first());
        match newest {
            Some(run) => map_workflow_run(run),
            None => {
                debug!(branch, "dispatched workflow not yet listed");
                Ok(PipelineRun {
                    id: 0,
                    status: PipelineStatus::Pending,
                    git_ref: branch.to_owned(),
                    url: None,
                })
            }
        }
    }

    async fn get_pipeline_status(&self, pipeline_id: u64) -> ProviderResult<PipelineStatus> {
        let run = self
            .get(self.repo_url(&format!("/actions/runs/{pipeline_id}")))
            .await?;
        Ok(workflow_run_status(&run))
    }
}

/// Maps one pull-request payload into the provider-agnostic shape.
pub(crate) fn map_pull_request(payload: &Value) -> ProviderResult<PullRequest> {
    let merged = payload
        .get("merged")
        .and_then(Value::as_bool)
        .unwrap_or_else(|| {
            payload
                .get("merged_at")
                .is_some_and(|merged_at| !merged_at.is_null())
        });
    let state = match required_str(payload, "state")?.as_str() {
        "open" => PullRequestState::Open,
        _ if merged => PullRequestState::Merged,
        _ => PullRequestState::Closed,
    };

    Ok(PullRequest {
        number: required_u64(payload, "number")?,
        title: required_str(payload, "title")?,
        body: optional_str(payload, "body").unwrap_or_default(),
        state,
        draft: payload.get("draft").and_then(Value::as_bool).unwrap_or(false),
        head_branch: payload
            .get("head")
            .and_then(|head| head.get("ref"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        base_branch: payload
            .get("base")
            .and_then(|base| base.get("ref"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        merged,
        labels: label_names(payload, "labels"),
        url: optional_str(payload, "html_url"),
        // CI state lives behind a separate status query on this provider.
        ci_status: None,
        created_at: timestamp(payload, "created_at"),
        updated_at: timestamp(payload, "updated_at"),
    })
}

/// Maps one branch payload, flagging the repository default.
pub(crate) fn map_branch(payload: &Value, default_branch: &str) -> ProviderResult<GitBranch> {
    let name = required_str(payload, "name")?;
    Ok(GitBranch {
        is_default: name == default_branch,
        head_sha: payload
            .get("commit")
            .and_then(|commit| commit.get("sha"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        protected: payload
            .get("protected")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        name,
    })
}

/// Maps one commit payload.
pub(crate) fn map_commit(payload: &Value) -> ProviderResult<GitCommit> {
    let detail = payload.get("commit").unwrap_or(payload);
    Ok(GitCommit {
        sha: required_str(payload, "sha")?,
        message: optional_str(detail, "message").unwrap_or_default(),
        author: detail
            .get("author")
            .and_then(|author| author.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        authored_at: detail
            .get("author")
            .and_then(|author| author.get("date"))
            .and_then(Value::as_str)
            .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.with_timezone(&chrono::Utc)),
    })
}

/// Maps one workflow-run payload into a pipeline run.
pub(crate) fn map_workflow_run(payload: &Value) -> ProviderResult<PipelineRun> {
    Ok(PipelineRun {
        id: required_u64(payload, "id")?,
        status: workflow_run_status(payload),
        git_ref: optional_str(payload, "head_branch").unwrap_or_default(),
        url: optional_str(payload, "html_url"),
    })
}

/// Derives the shared pipeline status from a workflow run's status and
/// conclusion fields.
pub(crate) fn workflow_run_status(payload: &Value) -> PipelineStatus {
    let status = payload.get("status").and_then(Value::as_str).unwrap_or("");
    let conclusion = payload.get("conclusion").and_then(Value::as_str);
    match status {
        "queued" | "waiting" | "requested" | "pending" => PipelineStatus::Pending,
        "in_progress" => PipelineStatus::Running,
        "completed" => match conclusion.unwrap_or("") {
            "success" => PipelineStatus::Success,
            "cancelled" => PipelineStatus::Cancelled,
            "skipped" | "neutral" => PipelineStatus::Skipped,
            // failure, timed_out, startup_failure, action_required, …
            _ => PipelineStatus::Failure,
        },
        _ => PipelineStatus::Pending,
    }
}
