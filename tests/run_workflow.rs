//! A run's life over the public API: document, environment, settlement.

use std::sync::Arc;

use mockable::DefaultClock;
use stevedore::config::OrchestratorConfig;
use stevedore::engine::adapters::InMemoryEngine;
use stevedore::engine::domain::{EnvironmentStatus, labels};
use stevedore::engine::ports::ContainerEngine;
use stevedore::prd::domain::StoryPatch;
use stevedore::prd::services::PrdManager;
use stevedore::run::domain::RunStatus;
use stevedore::run::services::{RunCoordinator, RunOptions};

#[tokio::test(flavor = "multi_thread")]
async fn template_to_completed_run() {
    let manager = PrdManager::new();
    let document = manager
        .create_from_template("api-service", "Orders API", "An API for orders.")
        .expect("template exists");
    assert!(manager.validate(&document).is_empty());

    let engine = InMemoryEngine::new();
    let coordinator = RunCoordinator::new(
        Arc::new(engine.clone()),
        Arc::new(DefaultClock),
        OrchestratorConfig::default(),
    );

    let mut run = coordinator.create_run("orders-run", document);
    let environment = coordinator
        .provision(&mut run, &RunOptions::default())
        .await
        .expect("provisioning succeeds");
    assert_eq!(run.status(), RunStatus::Running);
    assert_eq!(
        environment.labels.get(labels::RUN_ID).map(String::as_str),
        Some(run.id().to_string().as_str())
    );

    // Resolve both template stories, as the iterating agent would.
    let story_ids: Vec<String> = run.stories().iter().map(|story| story.id.clone()).collect();
    for story_id in &story_ids {
        run.apply_story_result(story_id, &StoryPatch::passed(), &DefaultClock)
            .expect("story exists");
    }
    assert!(run.progress().is_complete());

    let body = coordinator
        .render_pull_request_body(&run)
        .expect("template renders");
    assert!(body.contains("2/2 stories passing"));

    coordinator.finalize(&mut run).await.expect("finalize succeeds");
    assert_eq!(run.status(), RunStatus::Completed);

    let stopped = engine
        .get_container(&environment.id)
        .await
        .expect("lookup succeeds")
        .expect("environment exists");
    assert_eq!(stopped.status, EnvironmentStatus::Exited);
}
