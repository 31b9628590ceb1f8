//! Catalog and validation tests for the document manager.

use crate::prd::domain::{DEFAULT_MAX_ATTEMPTS, UserStory};
use crate::prd::services::PrdManager;
use rstest::{fixture, rstest};

#[fixture]
fn manager() -> PrdManager {
    PrdManager::new()
}

#[rstest]
fn api_service_template_builds_two_fresh_stories(manager: PrdManager) {
    let document = manager
        .create_from_template("api-service", "Orders API", "An API for orders.")
        .expect("template exists");

    assert_eq!(document.stories.len(), 2);
    for story in &document.stories {
        assert!(!story.passes);
        assert_eq!(story.attempts, 0);
        assert_eq!(story.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(
            story.id.starts_with(&document.id.to_string()),
            "story id '{}' must be prefixed with the document id",
            story.id
        );
    }
}

#[rstest]
fn unknown_template_is_a_typed_error(manager: PrdManager) {
    let result = manager.create_from_template("no-such-template", "T", "D");
    assert!(result.is_err());
}

#[rstest]
fn template_lookup_by_id_and_category(manager: PrdManager) {
    assert!(manager.template("api-service").is_some());
    assert!(manager.template("missing").is_none());

    let backend = manager.templates_in_category("backend");
    assert!(backend.iter().any(|template| template.id == "api-service"));
    assert!(manager.templates_in_category("no-such-category").is_empty());
}

#[rstest]
fn create_assigns_branch_name_and_version(manager: PrdManager) {
    let document = manager.create(
        "Payment retries",
        "Retry failed payments.",
        vec![UserStory::new(
            "p-s1",
            "Retry once",
            "Retry a failed payment one time.",
            vec!["one retry happens".to_owned()],
        )],
    );

    assert!(document.branch_name.starts_with("payment-retries-"));
    assert_eq!(document.version, "1.0.0");
}

#[rstest]
fn validation_flags_every_structural_problem(manager: PrdManager) {
    let mut document = manager.create("", "", Vec::<UserStory>::new());
    document.stories.push(UserStory::new("x-s1", "", "", Vec::<String>::new()));

    let issues = manager.validate(&document);
    let fields: Vec<&str> = issues.iter().map(|issue| issue.field.as_str()).collect();

    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"description"));
    assert!(fields.contains(&"stories[0].title"));
    assert!(fields.contains(&"stories[0].description"));
    assert!(fields.contains(&"stories[0].acceptance_criteria"));
}

#[rstest]
fn validation_passes_a_sound_document(manager: PrdManager) {
    let document = manager
        .create_from_template("cli-tool", "Linter", "A linter CLI.")
        .expect("template exists");
    assert!(manager.validate(&document).is_empty());
}
