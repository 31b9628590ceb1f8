//! Pure reclaim-decision tests.

use super::{FixedClock, managed_environment};
use crate::engine::domain::{EnvironmentStatus, labels};
use crate::gc::domain::{GcPolicy, ReclaimReason, reclaim_decision};
use mockable::Clock;
use rstest::{fixture, rstest};
use std::time::Duration;

#[fixture]
fn policy() -> GcPolicy {
    GcPolicy {
        max_idle_time: Duration::from_secs(600),
        preserve_completed: Duration::from_secs(3600),
        preserve_failed: Duration::from_secs(7200),
        ..GcPolicy::default()
    }
}

#[rstest]
fn running_environments_are_never_reclaimed(policy: GcPolicy) {
    // Idle far past every ceiling; running still wins.
    let env = managed_environment("r1", EnvironmentStatus::Running, 1_000_000, None);
    let decision = reclaim_decision(&env, &policy, FixedClock::reference().utc());
    assert_eq!(decision, None);
}

#[rstest]
#[case::exited(EnvironmentStatus::Exited)]
#[case::created(EnvironmentStatus::Created)]
#[case::paused(EnvironmentStatus::Paused)]
#[case::dead(EnvironmentStatus::Dead)]
fn idle_past_the_ceiling_is_reclaimed(policy: GcPolicy, #[case] status: EnvironmentStatus) {
    let env = managed_environment("i1", status, 601, None);
    let decision = reclaim_decision(&env, &policy, FixedClock::reference().utc());
    assert_eq!(decision, Some(ReclaimReason::Idle));
}

#[rstest]
fn idle_inside_the_ceiling_is_kept(policy: GcPolicy) {
    let env = managed_environment("i2", EnvironmentStatus::Exited, 599, None);
    let decision = reclaim_decision(&env, &policy, FixedClock::reference().utc());
    assert_eq!(decision, None);
}

#[rstest]
fn completed_runs_are_reclaimed_only_past_their_window(policy: GcPolicy) {
    let now = FixedClock::reference().utc();

    let fresh = managed_environment(
        "c1",
        EnvironmentStatus::Exited,
        300,
        Some(labels::RUN_STATUS_COMPLETED),
    );
    assert_eq!(reclaim_decision(&fresh, &policy, now), None);

    let stale = managed_environment(
        "c2",
        EnvironmentStatus::Exited,
        3601,
        Some(labels::RUN_STATUS_COMPLETED),
    );
    // 3601s is past preserve_completed (1h) but past max_idle_time (10min)
    // too, and the idle rule is evaluated first.
    assert_eq!(reclaim_decision(&stale, &policy, now), Some(ReclaimReason::Idle));
}

#[rstest]
fn completed_retention_fires_when_idle_rule_does_not() {
    let now = FixedClock::reference().utc();
    let policy = GcPolicy {
        max_idle_time: Duration::from_secs(600),
        preserve_completed: Duration::ZERO,
        ..GcPolicy::default()
    };
    let env = managed_environment(
        "c3",
        EnvironmentStatus::Exited,
        10,
        Some(labels::RUN_STATUS_COMPLETED),
    );
    assert_eq!(
        reclaim_decision(&env, &policy, now),
        Some(ReclaimReason::CompletedRetention)
    );
}

#[rstest]
fn failed_retention_has_its_own_window() {
    let now = FixedClock::reference().utc();
    let policy = GcPolicy {
        max_idle_time: Duration::from_secs(10_000),
        preserve_completed: Duration::from_secs(60),
        preserve_failed: Duration::from_secs(7200),
        ..GcPolicy::default()
    };

    let failed_fresh = managed_environment(
        "f1",
        EnvironmentStatus::Exited,
        3600,
        Some(labels::RUN_STATUS_FAILED),
    );
    assert_eq!(reclaim_decision(&failed_fresh, &policy, now), None);

    let failed_stale = managed_environment(
        "f2",
        EnvironmentStatus::Exited,
        7201,
        Some(labels::RUN_STATUS_FAILED),
    );
    assert_eq!(
        reclaim_decision(&failed_stale, &policy, now),
        Some(ReclaimReason::FailedRetention)
    );
}

#[rstest]
fn in_progress_run_label_gets_no_retention_rule(policy: GcPolicy) {
    let env = managed_environment(
        "p1",
        EnvironmentStatus::Exited,
        300,
        Some(labels::RUN_STATUS_RUNNING),
    );
    let decision = reclaim_decision(&env, &policy, FixedClock::reference().utc());
    assert_eq!(decision, None);
}
