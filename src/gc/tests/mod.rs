//! Unit tests for the reclaim module.

mod decision_tests;
mod service_tests;
mod sweep_tests;

use crate::engine::domain::{
    EnvironmentId, EnvironmentName, EnvironmentStatus, ExecutionEnvironment, labels,
};
use chrono::{DateTime, Duration as ChronoDuration, Local, TimeZone, Utc};
use mockable::Clock;
use std::collections::BTreeMap;

/// Deterministic clock pinned to one instant.
pub(crate) struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A fixed reference instant shared by the reclaim tests.
    pub(crate) fn reference() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a managed environment snapshot that finished `age_secs` before
/// the reference instant.
pub(crate) fn managed_environment(
    id: &str,
    status: EnvironmentStatus,
    age_secs: i64,
    run_status: Option<&str>,
) -> ExecutionEnvironment {
    let now = FixedClock::reference().utc();
    let finished = now - ChronoDuration::seconds(age_secs);
    let mut env_labels = BTreeMap::new();
    env_labels.insert(labels::MANAGED.to_owned(), labels::MANAGED_VALUE.to_owned());
    env_labels.insert(labels::RUN_ID.to_owned(), format!("run-{id}"));
    if let Some(value) = run_status {
        env_labels.insert(labels::RUN_STATUS.to_owned(), value.to_owned());
    }
    ExecutionEnvironment {
        id: EnvironmentId::new(id),
        name: EnvironmentName::new(format!("env-{id}")),
        image: "registry.example.com/agent:latest".to_owned(),
        status,
        created_at: finished - ChronoDuration::seconds(60),
        started_at: Some(finished - ChronoDuration::seconds(30)),
        finished_at: (!status.is_running()).then_some(finished),
        exit_code: (!status.is_running()).then_some(0),
        labels: env_labels,
    }
}
