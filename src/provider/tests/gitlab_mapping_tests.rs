//! Boundary-mapping tests for the merge-request-based provider.

use crate::provider::adapters::gitlab::{
    map_branch, map_commit, map_merge_request, map_pipeline, pipeline_status,
};
use crate::provider::domain::{PipelineStatus, PullRequestState};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn merge_request_derives_ci_from_embedded_pipeline() {
    let payload = json!({
        "iid": 7,
        "title": "Add search endpoint",
        "description": "Implements catalog search.",
        "state": "opened",
        "draft": false,
        "source_branch": "catalog-search-abc123",
        "target_branch": "main",
        "labels": ["automated"],
        "web_url": "https://example.com/mrs/7",
        "head_pipeline": { "id": 42, "status": "running" },
        "created_at": "2026-03-01T10:00:00Z",
        "updated_at": "2026-03-01T11:00:00Z"
    });

    let mapped = map_merge_request(&payload).expect("payload maps");
    assert_eq!(mapped.number, 7);
    assert_eq!(mapped.state, PullRequestState::Open);
    // CI state rides along inside the merge-request payload.
    assert_eq!(mapped.ci_status, Some(PipelineStatus::Running));
    assert_eq!(mapped.labels, vec!["automated".to_owned()]);
}

#[rstest]
fn merged_state_maps_to_merged() {
    let payload = json!({
        "iid": 8,
        "title": "Done work",
        "state": "merged",
        "source_branch": "done",
        "target_branch": "main"
    });
    let mapped = map_merge_request(&payload).expect("payload maps");
    assert_eq!(mapped.state, PullRequestState::Merged);
    assert!(mapped.merged);
}

#[rstest]
fn draft_falls_back_to_the_title_prefix() {
    let payload = json!({
        "iid": 9,
        "title": "Draft: Risky change",
        "state": "opened",
        "source_branch": "risky",
        "target_branch": "main"
    });
    assert!(map_merge_request(&payload).expect("payload maps").draft);
}

#[rstest]
fn absent_head_pipeline_leaves_ci_unset() {
    let payload = json!({
        "iid": 10,
        "title": "No CI yet",
        "state": "opened",
        "source_branch": "x",
        "target_branch": "main",
        "head_pipeline": null
    });
    assert!(map_merge_request(&payload).expect("payload maps").ci_status.is_none());
}

#[rstest]
fn branch_mapping_reads_embedded_default_flag() {
    let payload = json!({
        "name": "main",
        "default": true,
        "protected": true,
        "commit": { "id": "abc123" }
    });
    let mapped = map_branch(&payload).expect("payload maps");
    assert!(mapped.is_default);
    assert_eq!(mapped.head_sha, "abc123");
}

#[rstest]
fn commit_mapping_prefers_full_message() {
    let payload = json!({
        "id": "abc123",
        "title": "Short",
        "message": "Short\n\nLong body.",
        "author_name": "Alice",
        "created_at": "2026-03-01T10:00:00Z"
    });
    let mapped = map_commit(&payload).expect("payload maps");
    assert_eq!(mapped.message, "Short\n\nLong body.");
    assert_eq!(mapped.author, "Alice");
}

#[rstest]
fn pipeline_mapping_normalizes_the_run() {
    let payload = json!({
        "id": 42,
        "status": "pending",
        "ref": "catalog-search-abc123",
        "web_url": "https://example.com/pipelines/42"
    });
    let mapped = map_pipeline(&payload).expect("payload maps");
    assert_eq!(mapped.id, 42);
    assert_eq!(mapped.status, PipelineStatus::Pending);
    assert_eq!(mapped.git_ref, "catalog-search-abc123");
}

#[rstest]
#[case("created", PipelineStatus::Pending)]
#[case("waiting_for_resource", PipelineStatus::Pending)]
#[case("running", PipelineStatus::Running)]
#[case("success", PipelineStatus::Success)]
#[case("failed", PipelineStatus::Failure)]
#[case("canceled", PipelineStatus::Cancelled)]
#[case("skipped", PipelineStatus::Skipped)]
#[case("manual", PipelineStatus::Skipped)]
fn pipeline_status_vocabulary(#[case] native: &str, #[case] expected: PipelineStatus) {
    assert_eq!(pipeline_status(native), expected);
}
