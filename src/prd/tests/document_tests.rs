//! Story-update and lookup tests for the document aggregate.

use crate::prd::domain::{StoryNotFoundError, StoryPatch, UserStory};
use crate::prd::services::PrdManager;
use rstest::{fixture, rstest};

#[fixture]
fn manager() -> PrdManager {
    PrdManager::new()
}

fn story(id: &str) -> UserStory {
    UserStory::new(
        id,
        "Do the thing",
        "Make the thing happen",
        vec!["thing happens".to_owned()],
    )
}

#[rstest]
fn update_story_replaces_only_the_target(manager: PrdManager) {
    let document = manager.create(
        "Widget work",
        "Widgets need work",
        vec![story("s1"), story("s2")],
    );

    let updated = document
        .update_story("s1", &StoryPatch::passed())
        .expect("story exists");

    let first = updated.story("s1").expect("story s1 exists");
    let second = updated.story("s2").expect("story s2 exists");
    assert!(first.passes);
    assert!(first.last_error.is_none());
    assert!(!second.passes);
    // The receiver stays untouched.
    assert!(!document.story("s1").expect("story s1 exists").passes);
}

#[rstest]
fn update_story_rejects_unknown_id(manager: PrdManager) {
    let document = manager.create("Widget work", "Widgets need work", vec![story("s1")]);
    let result = document.update_story("missing", &StoryPatch::passed());
    assert_eq!(result, Err(StoryNotFoundError("missing".to_owned())));
}

#[rstest]
fn failed_attempt_patch_records_attempts_and_error(manager: PrdManager) {
    let document = manager.create("Widget work", "Widgets need work", vec![story("s1")]);
    let updated = document
        .update_story("s1", &StoryPatch::failed_attempt(2, "tests failed"))
        .expect("story exists");

    let patched = updated.story("s1").expect("story s1 exists");
    assert_eq!(patched.attempts, 2);
    assert_eq!(patched.last_error.as_deref(), Some("tests failed"));
    assert!(!patched.passes);
}

#[rstest]
fn exhaustion_requires_ceiling_and_failure() {
    let mut exhausted = story("s1");
    exhausted.attempts = 3;
    assert!(exhausted.is_exhausted());

    let mut passed_at_ceiling = story("s2");
    passed_at_ceiling.attempts = 3;
    passed_at_ceiling.passes = true;
    assert!(!passed_at_ceiling.is_exhausted());

    let in_progress = story("s3");
    assert!(!in_progress.is_exhausted());
}
