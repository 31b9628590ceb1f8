//! End-to-end reclaim sweeps over the in-process engine.

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use stevedore::engine::adapters::InMemoryEngine;
use stevedore::engine::domain::{EnvironmentConfig, EnvironmentFilter, labels};
use stevedore::engine::ports::ContainerEngine;
use stevedore::gc::adapters::InMemoryArchiveStore;
use stevedore::gc::domain::GcPolicy;
use stevedore::gc::services::GcService;

fn managed_config(name: &str, run_status: &str) -> EnvironmentConfig {
    EnvironmentConfig::new(name, "registry.example.com/agent:latest")
        .with_label(labels::MANAGED, labels::MANAGED_VALUE)
        .with_label(labels::RUN_ID, format!("run-{name}"))
        .with_label(labels::RUN_STATUS, run_status)
}

#[tokio::test(flavor = "multi_thread")]
async fn sweep_reclaims_stopped_environments_and_archives_run_state() {
    let engine = InMemoryEngine::new();
    for index in 0..3 {
        let created = engine
            .create_container(&managed_config(
                &format!("env-{index}"),
                labels::RUN_STATUS_COMPLETED,
            ))
            .await
            .expect("create succeeds");
        engine
            .start_container(&created.id)
            .await
            .expect("start succeeds");
        engine
            .stop_container(&created.id, Duration::from_secs(1))
            .await
            .expect("stop succeeds");
    }

    let archive = InMemoryArchiveStore::new();
    let policy = GcPolicy {
        // Completed runs get no grace at all.
        preserve_completed: Duration::ZERO,
        ..GcPolicy::default()
    };
    let service = Arc::new(GcService::new(
        Arc::new(engine.clone()),
        Arc::new(archive.clone()),
        Arc::new(DefaultClock),
        policy,
    ));

    let report = service
        .run_gc()
        .await
        .report()
        .expect("sweep completes");

    assert_eq!(report.removed.len(), 3);
    assert_eq!(report.archived.len(), 3);
    assert!(report.errors.is_empty());
    assert!(
        engine
            .list_containers(&EnvironmentFilter::managed())
            .await
            .is_empty()
    );
    assert_eq!(archive.archived().len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn cleanup_all_reclaims_even_running_environments() {
    let engine = InMemoryEngine::new();
    for index in 0..2 {
        let created = engine
            .create_container(&managed_config(
                &format!("busy-{index}"),
                labels::RUN_STATUS_RUNNING,
            ))
            .await
            .expect("create succeeds");
        engine
            .start_container(&created.id)
            .await
            .expect("start succeeds");
    }
    let service = Arc::new(GcService::new(
        Arc::new(engine.clone()),
        Arc::new(InMemoryArchiveStore::new()),
        Arc::new(DefaultClock),
        GcPolicy::default(),
    ));

    // A normal sweep leaves running environments alone.
    let untouched = service.run_gc().await.report().expect("sweep completes");
    assert!(untouched.removed.is_empty());

    // The unconditional reclaim does not.
    let report = service.cleanup_all().await;
    assert_eq!(report.removed.len(), 2);
    assert!(
        engine
            .list_containers(&EnvironmentFilter::managed())
            .await
            .is_empty()
    );
}
