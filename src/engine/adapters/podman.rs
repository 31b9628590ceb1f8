//! Backend profile for the drop-in compatible daemonless engine.

use super::cli::{EngineCommands, EngineProfile};
use crate::engine::domain::EnvironmentStatus;
use crate::engine::ports::EngineKind;

/// Native status vocabulary of the daemonless engine.
///
/// Mostly the general engine's vocabulary plus its own pre-start and
/// teardown states.
pub(crate) const STATUS_MAP: &[(&str, EnvironmentStatus)] = &[
    ("configured", EnvironmentStatus::Created),
    ("initialized", EnvironmentStatus::Created),
    ("created", EnvironmentStatus::Created),
    ("running", EnvironmentStatus::Running),
    ("paused", EnvironmentStatus::Paused),
    ("restarting", EnvironmentStatus::Restarting),
    ("stopping", EnvironmentStatus::Removing),
    ("removing", EnvironmentStatus::Removing),
    ("stopped", EnvironmentStatus::Exited),
    ("exited", EnvironmentStatus::Exited),
    ("dead", EnvironmentStatus::Dead),
];

/// Profile driving the `podman` binary.
pub(crate) static PROFILE: EngineProfile = EngineProfile {
    kind: EngineKind::Podman,
    binary: "podman",
    commands: EngineCommands {
        probe: &["version", "--format", "{{.Client.Version}}"],
        create: &["create"],
        start: &["start"],
        stop: &["stop"],
        remove: &["rm"],
        list: &["ps"],
        inspect: &["inspect"],
        exec: &["exec"],
        pull: &["pull"],
        stats: &["stats", "--no-stream", "--format", "json"],
    },
    status_map: STATUS_MAP,
    supports_stats: true,
    supports_label_filters: true,
    starts_on_create: false,
    platform: None,
};
