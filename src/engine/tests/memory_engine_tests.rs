//! Contract tests exercised against the in-process engine.

use crate::engine::adapters::InMemoryEngine;
use crate::engine::domain::{
    EnvironmentConfig, EnvironmentFilter, EnvironmentId, EnvironmentStatus, ExecRequest, labels,
};
use crate::engine::ports::ContainerEngine;
use rstest::{fixture, rstest};
use std::time::Duration;

#[fixture]
fn engine() -> InMemoryEngine {
    InMemoryEngine::new()
}

fn managed_config(name: &str) -> EnvironmentConfig {
    EnvironmentConfig::new(name, "registry.example.com/agent:latest")
        .with_label(labels::MANAGED, labels::MANAGED_VALUE)
        .with_label(labels::RUN_ID, "run-1")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_id_and_pulls_image(engine: InMemoryEngine) {
    let created = engine
        .create_container(&managed_config("env-a"))
        .await
        .expect("create should succeed");

    assert_eq!(created.status, EnvironmentStatus::Created);
    assert!(!created.id.as_str().is_empty());
    assert_eq!(
        engine.pulled_images(),
        vec!["registry.example.com/agent:latest".to_owned()]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_duplicate_names(engine: InMemoryEngine) {
    engine
        .create_container(&managed_config("env-a"))
        .await
        .expect("first create should succeed");
    let duplicate = engine.create_container(&managed_config("env-a")).await;
    assert!(duplicate.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn start_then_stop_walks_the_lifecycle(engine: InMemoryEngine) {
    let created = engine
        .create_container(&managed_config("env-a"))
        .await
        .expect("create should succeed");

    engine
        .start_container(&created.id)
        .await
        .expect("start should succeed");
    let running = engine
        .get_container(&created.id)
        .await
        .expect("lookup should succeed")
        .expect("environment should exist");
    assert_eq!(running.status, EnvironmentStatus::Running);
    assert!(running.started_at.is_some());

    engine
        .stop_container(&created.id, Duration::from_secs(5))
        .await
        .expect("stop should succeed");
    let stopped = engine
        .get_container(&created.id)
        .await
        .expect("lookup should succeed")
        .expect("environment should exist");
    assert_eq!(stopped.status, EnvironmentStatus::Exited);
    assert_eq!(stopped.exit_code, Some(0));
    assert!(stopped.finished_at.is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_container_returns_none_for_unknown_id(engine: InMemoryEngine) {
    let missing = engine
        .get_container(&EnvironmentId::new("does-not-exist"))
        .await
        .expect("lookup should succeed");
    assert!(missing.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_unknown_id_is_idempotent(engine: InMemoryEngine) {
    engine
        .remove_container(&EnvironmentId::new("already-gone"), true)
        .await
        .expect("removing an unknown id should be a no-op");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_label_selectors(engine: InMemoryEngine) {
    engine
        .create_container(&managed_config("env-a"))
        .await
        .expect("create should succeed");
    engine
        .create_container(&EnvironmentConfig::new("env-b", "img"))
        .await
        .expect("create should succeed");

    let managed = engine.list_containers(&EnvironmentFilter::managed()).await;
    assert_eq!(managed.len(), 1);
    assert!(managed.iter().all(|env| env.name.as_str() == "env-a"));

    let everything = engine.list_containers(&EnvironmentFilter::default().with_label("x", "y")).await;
    assert!(everything.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exec_requires_a_running_environment(engine: InMemoryEngine) {
    let created = engine
        .create_container(&managed_config("env-a"))
        .await
        .expect("create should succeed");

    let stopped_result = engine
        .exec(&created.id, &ExecRequest::new(vec!["true".to_owned()]))
        .await;
    assert!(stopped_result.is_err());

    engine
        .start_container(&created.id)
        .await
        .expect("start should succeed");
    let output = engine
        .exec(&created.id, &ExecRequest::new(vec!["true".to_owned()]))
        .await
        .expect("exec should succeed on a running environment");
    assert!(output.success());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pull_image_is_idempotent(engine: InMemoryEngine) {
    engine.pull_image("img:1").await.expect("pull should succeed");
    engine.pull_image("img:1").await.expect("pull should succeed");
    assert_eq!(engine.pulled_images(), vec!["img:1".to_owned()]);
}
