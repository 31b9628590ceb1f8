//! Service-level tests: re-entrancy, policy reload, timer, full reclaim.

use super::{FixedClock, managed_environment};
use crate::engine::adapters::InMemoryEngine;
use crate::engine::domain::{EnvironmentStatus, ExecutionEnvironment};
use crate::gc::adapters::InMemoryArchiveStore;
use crate::gc::domain::{GcPolicy, SweepOutcome};
use crate::gc::ports::{ArchiveError, ArchiveStore};
use crate::gc::services::{DEFAULT_SWEEP_CADENCE, GcService};
use async_trait::async_trait;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Archive store that parks until released, so a sweep can be held
/// in flight deterministically.
struct BlockingArchiveStore {
    entered: Notify,
    release: Notify,
}

impl BlockingArchiveStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
        })
    }
}

#[async_trait]
impl ArchiveStore for BlockingArchiveStore {
    async fn archive(&self, _environment: &ExecutionEnvironment) -> Result<(), ArchiveError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_sweep_request_during_a_sweep_is_a_no_op() {
    let engine = InMemoryEngine::new();
    engine.insert_environment(managed_environment(
        "busy",
        EnvironmentStatus::Exited,
        100_000,
        None,
    ));
    let archive = BlockingArchiveStore::new();
    let service = Arc::new(GcService::new(
        Arc::new(engine),
        Arc::clone(&archive),
        Arc::new(FixedClock::reference()),
        GcPolicy::default(),
    ));

    let in_flight = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.run_gc().await })
    };
    // Wait until the first sweep is parked inside the archive call.
    archive.entered.notified().await;

    let second = service.run_gc().await;
    assert_eq!(second, SweepOutcome::AlreadyRunning);

    archive.release.notify_one();
    let first = in_flight.await.expect("sweep task should finish");
    assert!(matches!(first, SweepOutcome::Completed(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn policy_updates_apply_on_the_next_sweep() {
    let engine = InMemoryEngine::new();
    engine.insert_environment(managed_environment(
        "p1",
        EnvironmentStatus::Exited,
        500,
        None,
    ));
    let service = Arc::new(GcService::new(
        Arc::new(engine.clone()),
        Arc::new(InMemoryArchiveStore::new()),
        Arc::new(FixedClock::reference()),
        GcPolicy {
            max_idle_time: Duration::from_secs(1000),
            ..GcPolicy::default()
        },
    ));

    let kept = service.run_gc().await.report().expect("sweep should complete");
    assert!(kept.removed.is_empty());

    service.update_policy(GcPolicy {
        max_idle_time: Duration::from_secs(100),
        ..GcPolicy::default()
    });
    assert_eq!(service.policy().max_idle_time, Duration::from_secs(100));

    let reclaimed = service.run_gc().await.report().expect("sweep should complete");
    assert_eq!(reclaimed.removed.len(), 1);
    assert!(engine.known_ids().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cleanup_all_reclaims_running_environments_too() {
    let engine = InMemoryEngine::new();
    engine.insert_environment(managed_environment(
        "r1",
        EnvironmentStatus::Running,
        10,
        None,
    ));
    engine.insert_environment(managed_environment(
        "s1",
        EnvironmentStatus::Exited,
        10,
        None,
    ));
    let service = Arc::new(GcService::new(
        Arc::new(engine.clone()),
        Arc::new(InMemoryArchiveStore::new()),
        Arc::new(FixedClock::reference()),
        GcPolicy::default(),
    ));

    let report = service.cleanup_all().await;

    assert_eq!(report.removed.len(), 2);
    assert!(engine.known_ids().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn timer_start_and_stop_are_idempotent() {
    let engine = InMemoryEngine::new();
    engine.insert_environment(managed_environment(
        "t1",
        EnvironmentStatus::Exited,
        100_000,
        None,
    ));
    let service = Arc::new(GcService::new(
        Arc::new(engine.clone()),
        Arc::new(InMemoryArchiveStore::new()),
        Arc::new(FixedClock::reference()),
        GcPolicy::default(),
    ));

    Arc::clone(&service).start(DEFAULT_SWEEP_CADENCE);
    Arc::clone(&service).start(DEFAULT_SWEEP_CADENCE);

    // The first tick fires immediately; give it a moment to land.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(engine.known_ids().is_empty(), "startup sweep should have run");

    service.stop();
    service.stop();
}
