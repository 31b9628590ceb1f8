//! The reclaim sweep engine.

use crate::engine::domain::{EnvironmentFilter, ExecutionEnvironment};
use crate::engine::ports::ContainerEngine;
use crate::gc::domain::{
    GcItemError, GcPolicy, GcReport, ReclaimReason, SweepOutcome, reclaim_decision,
};
use crate::gc::ports::ArchiveStore;
use mockable::Clock;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Default sweep cadence.
pub const DEFAULT_SWEEP_CADENCE: Duration = Duration::from_secs(5 * 60);

/// Grace period granted when stopping a running environment for removal.
const RECLAIM_STOP_TIMEOUT: Duration = Duration::from_secs(10);

/// Periodic, policy-driven reclaim of execution environments.
///
/// At most one sweep executes at a time system-wide: the single-slot sweep
/// mutex makes "already running" structurally impossible to race. A sweep
/// requested while one is in flight is a no-op, not queued. Policy updates
/// take effect on the next sweep and never interrupt one in progress.
pub struct GcService<E, A, C>
where
    E: ContainerEngine,
    A: ArchiveStore,
    C: Clock + Send + Sync,
{
    engine: Arc<E>,
    archive: Arc<A>,
    clock: Arc<C>,
    policy: RwLock<GcPolicy>,
    sweep_slot: tokio::sync::Mutex<()>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<E, A, C> GcService<E, A, C>
where
    E: ContainerEngine + 'static,
    A: ArchiveStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a reclaim service over an engine and archive backend.
    #[must_use]
    pub fn new(engine: Arc<E>, archive: Arc<A>, clock: Arc<C>, policy: GcPolicy) -> Self {
        Self {
            engine,
            archive,
            clock,
            policy: RwLock::new(policy),
            sweep_slot: tokio::sync::Mutex::new(()),
            timer: Mutex::new(None),
        }
    }

    /// Returns the current policy.
    #[must_use]
    pub fn policy(&self) -> GcPolicy {
        match self.policy.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replaces the policy.
    ///
    /// Takes effect at the start of the next sweep.
    pub fn update_policy(&self, policy: GcPolicy) {
        match self.policy.write() {
            Ok(mut guard) => *guard = policy,
            Err(poisoned) => *poisoned.into_inner() = policy,
        }
    }

    /// Starts the recurring sweep timer.
    ///
    /// Idempotent: a second start while the timer runs is a no-op. The
    /// first sweep fires immediately, then every `cadence`.
    pub fn start(self: Arc<Self>, cadence: Duration) {
        let mut guard = match self.timer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.is_some() {
            return;
        }
        let service = Arc::clone(&self);
        *guard = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cadence);
            loop {
                ticker.tick().await;
                match service.run_gc().await {
                    SweepOutcome::Completed(report) => {
                        debug!(
                            removed = report.removed.len(),
                            archived = report.archived.len(),
                            errors = report.errors.len(),
                            "scheduled sweep finished"
                        );
                    }
                    SweepOutcome::AlreadyRunning => {
                        debug!("scheduled sweep skipped, one already in flight");
                    }
                    SweepOutcome::Disabled => {}
                }
            }
        }));
    }

    /// Stops the recurring sweep timer.
    ///
    /// Idempotent; an in-flight sweep finishes on its own.
    pub fn stop(&self) {
        let handle = match self.timer.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(timer) = handle {
            timer.abort();
        }
    }

    /// Runs one sweep now.
    ///
    /// Returns [`SweepOutcome::AlreadyRunning`] without doing anything when
    /// a sweep is in flight, and [`SweepOutcome::Disabled`] when the
    /// current policy turns reclaim off.
    pub async fn run_gc(&self) -> SweepOutcome {
        let Ok(_slot) = self.sweep_slot.try_lock() else {
            return SweepOutcome::AlreadyRunning;
        };
        let policy = self.policy();
        if !policy.enabled {
            return SweepOutcome::Disabled;
        }
        SweepOutcome::Completed(self.sweep(&policy).await)
    }

    /// Unconditionally reclaims every managed environment.
    ///
    /// Running environments are stopped first. Waits for any in-flight
    /// sweep to finish rather than skipping.
    pub async fn cleanup_all(&self) -> GcReport {
        let _slot = self.sweep_slot.lock().await;
        let mut report = GcReport::new(self.clock.utc());
        let environments = self
            .engine
            .list_containers(&EnvironmentFilter::managed())
            .await;
        info!(count = environments.len(), "unconditional reclaim of all managed environments");
        let policy = self.policy();
        for environment in &environments {
            self.reclaim(environment, &policy, ReclaimReason::Capacity, &mut report)
                .await;
        }
        report
    }

    /// One full sweep: per-environment policy, then the capacity pass.
    async fn sweep(&self, policy: &GcPolicy) -> GcReport {
        let now = self.clock.utc();
        let mut report = GcReport::new(now);

        let environments = self
            .engine
            .list_containers(&EnvironmentFilter::managed())
            .await;
        debug!(count = environments.len(), "sweep listed managed environments");

        for environment in &environments {
            if let Some(reason) = reclaim_decision(environment, policy, now) {
                self.reclaim(environment, policy, reason, &mut report).await;
            }
        }

        self.enforce_capacity(policy, &mut report).await;
        report
    }

    /// Capacity pass over the post-removal snapshot: keep the newest
    /// `max_containers_per_user` non-running environments, reclaim the
    /// oldest excess.
    async fn enforce_capacity(&self, policy: &GcPolicy, report: &mut GcReport) {
        let remaining = self
            .engine
            .list_containers(&EnvironmentFilter::managed())
            .await;
        let mut non_running: Vec<ExecutionEnvironment> = remaining
            .into_iter()
            .filter(|environment| !environment.status.is_running())
            .collect();
        if non_running.len() <= policy.max_containers_per_user {
            return;
        }

        non_running.sort_by_key(ExecutionEnvironment::last_activity);
        let excess = non_running.len() - policy.max_containers_per_user;
        debug!(excess, cap = policy.max_containers_per_user, "enforcing capacity cap");
        for environment in non_running.iter().take(excess) {
            self.reclaim(environment, policy, ReclaimReason::Capacity, report)
                .await;
        }
    }

    /// Archives (best-effort), stops, and removes one environment.
    ///
    /// Failures are recorded in the report; the sweep always continues.
    async fn reclaim(
        &self,
        environment: &ExecutionEnvironment,
        policy: &GcPolicy,
        reason: ReclaimReason,
        report: &mut GcReport,
    ) {
        if policy.backup_before_delete && environment.run_id().is_some() {
            match self.archive.archive(environment).await {
                Ok(()) => report.archived.push(environment.id.clone()),
                Err(err) => {
                    // Losing a backup never blocks reclaiming the resource.
                    warn!(
                        environment = %environment.id,
                        error = %err,
                        "archive before delete failed"
                    );
                }
            }
        }

        if environment.status.is_running() {
            if let Err(err) = self
                .engine
                .stop_container(&environment.id, RECLAIM_STOP_TIMEOUT)
                .await
            {
                warn!(environment = %environment.id, error = %err, "stop before removal failed");
            }
        }

        match self.engine.remove_container(&environment.id, true).await {
            Ok(()) => {
                info!(environment = %environment.id, %reason, "reclaimed environment");
                report.removed.push(environment.id.clone());
            }
            Err(err) => {
                report.errors.push(GcItemError {
                    id: environment.id.clone(),
                    message: err.to_string(),
                });
            }
        }
    }
}
