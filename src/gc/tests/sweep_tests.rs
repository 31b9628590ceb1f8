//! Full-sweep behaviour over the in-process engine.

use super::{FixedClock, managed_environment};
use crate::engine::adapters::InMemoryEngine;
use crate::engine::domain::{EnvironmentStatus, labels};
use crate::gc::adapters::InMemoryArchiveStore;
use crate::gc::domain::{GcPolicy, SweepOutcome};
use crate::gc::services::GcService;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

type TestService = GcService<InMemoryEngine, InMemoryArchiveStore, FixedClock>;

fn service(engine: &InMemoryEngine, archive: &InMemoryArchiveStore, policy: GcPolicy) -> Arc<TestService> {
    Arc::new(GcService::new(
        Arc::new(engine.clone()),
        Arc::new(archive.clone()),
        Arc::new(FixedClock::reference()),
        policy,
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seven_completed_environments_are_all_removed() {
    let engine = InMemoryEngine::new();
    for index in 0..7 {
        engine.insert_environment(managed_environment(
            &format!("c{index}"),
            EnvironmentStatus::Exited,
            10,
            Some(labels::RUN_STATUS_COMPLETED),
        ));
    }
    let archive = InMemoryArchiveStore::new();
    let policy = GcPolicy {
        max_idle_time: Duration::from_secs(60),
        preserve_completed: Duration::ZERO,
        max_containers_per_user: 5,
        ..GcPolicy::default()
    };

    let outcome = service(&engine, &archive, policy).run_gc().await;
    let report = outcome.report().expect("sweep should complete");

    assert_eq!(report.removed.len(), 7);
    assert!(report.errors.is_empty());
    assert!(engine.known_ids().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn running_environments_survive_every_rule() {
    let engine = InMemoryEngine::new();
    engine.insert_environment(managed_environment(
        "keep",
        EnvironmentStatus::Running,
        1_000_000,
        None,
    ));
    engine.insert_environment(managed_environment(
        "drop",
        EnvironmentStatus::Exited,
        1_000_000,
        None,
    ));
    let archive = InMemoryArchiveStore::new();

    let report = service(&engine, &archive, GcPolicy::default())
        .run_gc()
        .await
        .report()
        .expect("sweep should complete");

    assert_eq!(report.removed.len(), 1);
    assert_eq!(engine.known_ids(), vec!["keep".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn capacity_pass_removes_exactly_the_oldest_excess() {
    let engine = InMemoryEngine::new();
    // Ages 100..700 seconds; cap of 4 leaves the three oldest over the line.
    for (index, age) in [100_i64, 200, 300, 400, 500, 600, 700].iter().enumerate() {
        engine.insert_environment(managed_environment(
            &format!("e{index}"),
            EnvironmentStatus::Exited,
            *age,
            None,
        ));
    }
    let archive = InMemoryArchiveStore::new();
    let policy = GcPolicy {
        // Idle/retention rules must not fire; only capacity.
        max_idle_time: Duration::from_secs(100_000),
        max_containers_per_user: 4,
        ..GcPolicy::default()
    };

    let report = service(&engine, &archive, policy)
        .run_gc()
        .await
        .report()
        .expect("sweep should complete");

    assert_eq!(report.removed.len(), 3);
    // e6 (700s), e5 (600s), e4 (500s) are the oldest by last activity.
    let mut removed: Vec<String> = report
        .removed
        .iter()
        .map(|id| id.as_str().to_owned())
        .collect();
    removed.sort();
    assert_eq!(removed, vec!["e4".to_owned(), "e5".to_owned(), "e6".to_owned()]);

    let mut kept = engine.known_ids();
    kept.sort();
    assert_eq!(
        kept,
        vec!["e0".to_owned(), "e1".to_owned(), "e2".to_owned(), "e3".to_owned()]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn capacity_pass_ignores_running_environments() {
    let engine = InMemoryEngine::new();
    for index in 0..3 {
        engine.insert_environment(managed_environment(
            &format!("run{index}"),
            EnvironmentStatus::Running,
            1000,
            None,
        ));
    }
    engine.insert_environment(managed_environment("idle0", EnvironmentStatus::Exited, 50, None));
    let archive = InMemoryArchiveStore::new();
    let policy = GcPolicy {
        max_idle_time: Duration::from_secs(100_000),
        max_containers_per_user: 2,
        ..GcPolicy::default()
    };

    let report = service(&engine, &archive, policy)
        .run_gc()
        .await
        .report()
        .expect("sweep should complete");

    // One non-running environment, cap two: nothing to do.
    assert!(report.removed.is_empty());
    assert_eq!(engine.known_ids().len(), 4);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn backup_runs_before_delete_and_records_archived_ids() {
    let engine = InMemoryEngine::new();
    engine.insert_environment(managed_environment(
        "a1",
        EnvironmentStatus::Exited,
        100_000,
        Some(labels::RUN_STATUS_COMPLETED),
    ));
    let archive = InMemoryArchiveStore::new();

    let report = service(&engine, &archive, GcPolicy::default())
        .run_gc()
        .await
        .report()
        .expect("sweep should complete");

    assert_eq!(report.archived.len(), 1);
    assert_eq!(report.removed.len(), 1);
    assert_eq!(archive.archived().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_failure_never_blocks_deletion() {
    let engine = InMemoryEngine::new();
    engine.insert_environment(managed_environment(
        "a2",
        EnvironmentStatus::Exited,
        100_000,
        None,
    ));
    let archive = InMemoryArchiveStore::new();
    archive.fail_archives();

    let report = service(&engine, &archive, GcPolicy::default())
        .run_gc()
        .await
        .report()
        .expect("sweep should complete");

    assert!(report.archived.is_empty());
    assert_eq!(report.removed.len(), 1);
    assert!(engine.known_ids().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn backup_is_skipped_when_disabled_by_policy() {
    let engine = InMemoryEngine::new();
    engine.insert_environment(managed_environment(
        "a3",
        EnvironmentStatus::Exited,
        100_000,
        None,
    ));
    let archive = InMemoryArchiveStore::new();
    let policy = GcPolicy {
        backup_before_delete: false,
        ..GcPolicy::default()
    };

    let report = service(&engine, &archive, policy)
        .run_gc()
        .await
        .report()
        .expect("sweep should complete");

    assert!(report.archived.is_empty());
    assert!(archive.archived().is_empty());
    assert_eq!(report.removed.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unmanaged_environments_are_invisible_to_the_sweep() {
    let engine = InMemoryEngine::new();
    let mut foreign = managed_environment("foreign", EnvironmentStatus::Exited, 100_000, None);
    foreign.labels.clear();
    engine.insert_environment(foreign);
    let archive = InMemoryArchiveStore::new();

    let report = service(&engine, &archive, GcPolicy::default())
        .run_gc()
        .await
        .report()
        .expect("sweep should complete");

    assert!(report.removed.is_empty());
    assert_eq!(engine.known_ids(), vec!["foreign".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_policy_short_circuits() {
    let engine = InMemoryEngine::new();
    engine.insert_environment(managed_environment(
        "d1",
        EnvironmentStatus::Exited,
        100_000,
        None,
    ));
    let archive = InMemoryArchiveStore::new();
    let policy = GcPolicy {
        enabled: false,
        ..GcPolicy::default()
    };

    let outcome = service(&engine, &archive, policy).run_gc().await;
    assert_eq!(outcome, SweepOutcome::Disabled);
    assert_eq!(engine.known_ids().len(), 1);
}
