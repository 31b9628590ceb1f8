//! Boundary-mapping tests for the pull-request-based provider.

use crate::provider::adapters::github::{
    map_branch, map_commit, map_pull_request, map_workflow_run, workflow_run_status,
};
use crate::provider::domain::{PipelineStatus, PullRequestState};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn draft_pull_request_maps_open_and_draft() {
    let payload = json!({
        "number": 12,
        "title": "Add search endpoint",
        "body": "Implements catalog search.",
        "state": "open",
        "draft": true,
        "merged": false,
        "head": { "ref": "catalog-search-abc123" },
        "base": { "ref": "main" },
        "labels": [{ "name": "automated" }],
        "html_url": "https://example.com/pulls/12",
        "created_at": "2026-03-01T10:00:00Z",
        "updated_at": "2026-03-01T11:00:00Z"
    });

    let mapped = map_pull_request(&payload).expect("payload maps");
    assert_eq!(mapped.number, 12);
    assert!(mapped.draft);
    assert_eq!(mapped.state, PullRequestState::Open);
    assert_eq!(mapped.head_branch, "catalog-search-abc123");
    assert_eq!(mapped.base_branch, "main");
    assert_eq!(mapped.labels, vec!["automated".to_owned()]);
    assert!(!mapped.merged);
    // CI state needs a separate status query on this provider.
    assert!(mapped.ci_status.is_none());
}

#[rstest]
fn merged_pull_request_maps_merged_state() {
    let payload = json!({
        "number": 3,
        "title": "Fix flaky test",
        "body": null,
        "state": "closed",
        "draft": false,
        "merged_at": "2026-03-02T09:00:00Z",
        "head": { "ref": "fix" },
        "base": { "ref": "main" },
        "labels": []
    });

    let mapped = map_pull_request(&payload).expect("payload maps");
    assert_eq!(mapped.state, PullRequestState::Merged);
    assert!(mapped.merged);
    assert_eq!(mapped.body, "");
}

#[rstest]
fn closed_unmerged_pull_request_maps_closed_state() {
    let payload = json!({
        "number": 4,
        "title": "Abandoned",
        "state": "closed",
        "merged": false,
        "head": { "ref": "old" },
        "base": { "ref": "main" }
    });
    let mapped = map_pull_request(&payload).expect("payload maps");
    assert_eq!(mapped.state, PullRequestState::Closed);
    assert!(!mapped.merged);
}

#[rstest]
fn branch_mapping_flags_the_default() {
    let payload = json!({
        "name": "main",
        "commit": { "sha": "abc123" },
        "protected": true
    });
    let mapped = map_branch(&payload, "main").expect("payload maps");
    assert!(mapped.is_default);
    assert!(mapped.protected);
    assert_eq!(mapped.head_sha, "abc123");

    let other = json!({ "name": "feature", "commit": { "sha": "def456" } });
    assert!(!map_branch(&other, "main").expect("payload maps").is_default);
}

#[rstest]
fn commit_mapping_reads_nested_detail() {
    let payload = json!({
        "sha": "abc123",
        "commit": {
            "message": "Add search endpoint",
            "author": { "name": "Alice", "date": "2026-03-01T10:00:00Z" }
        }
    });
    let mapped = map_commit(&payload).expect("payload maps");
    assert_eq!(mapped.sha, "abc123");
    assert_eq!(mapped.message, "Add search endpoint");
    assert_eq!(mapped.author, "Alice");
    assert!(mapped.authored_at.is_some());
}

#[rstest]
#[case::queued(json!({ "status": "queued" }), PipelineStatus::Pending)]
#[case::in_progress(json!({ "status": "in_progress" }), PipelineStatus::Running)]
#[case::success(json!({ "status": "completed", "conclusion": "success" }), PipelineStatus::Success)]
#[case::failure(json!({ "status": "completed", "conclusion": "failure" }), PipelineStatus::Failure)]
#[case::timed_out(json!({ "status": "completed", "conclusion": "timed_out" }), PipelineStatus::Failure)]
#[case::cancelled(json!({ "status": "completed", "conclusion": "cancelled" }), PipelineStatus::Cancelled)]
#[case::skipped(json!({ "status": "completed", "conclusion": "skipped" }), PipelineStatus::Skipped)]
fn workflow_status_mapping(#[case] payload: serde_json::Value, #[case] expected: PipelineStatus) {
    assert_eq!(workflow_run_status(&payload), expected);
}

#[rstest]
fn workflow_run_maps_into_pipeline_run() {
    let payload = json!({
        "id": 991,
        "status": "in_progress",
        "conclusion": null,
        "head_branch": "catalog-search-abc123",
        "html_url": "https://example.com/runs/991"
    });
    let mapped = map_workflow_run(&payload).expect("payload maps");
    assert_eq!(mapped.id, 991);
    assert_eq!(mapped.status, PipelineStatus::Running);
    assert_eq!(mapped.git_ref, "catalog-search-abc123");
}

#[rstest]
fn missing_required_field_is_a_payload_error() {
    let payload = json!({ "title": "No number" });
    assert!(map_pull_request(&payload).is_err());
}
