//! Backend profile for the general container engine.

use super::cli::{EngineCommands, EngineProfile};
use crate::engine::domain::EnvironmentStatus;
use crate::engine::ports::EngineKind;

/// Native status vocabulary of the general engine.
pub(crate) const STATUS_MAP: &[(&str, EnvironmentStatus)] = &[
    ("created", EnvironmentStatus::Created),
    ("running", EnvironmentStatus::Running),
    ("paused", EnvironmentStatus::Paused),
    ("restarting", EnvironmentStatus::Restarting),
    ("removing", EnvironmentStatus::Removing),
    ("exited", EnvironmentStatus::Exited),
    ("dead", EnvironmentStatus::Dead),
];

/// Profile driving the `docker` binary.
pub(crate) static PROFILE: EngineProfile = EngineProfile {
    kind: EngineKind::Docker,
    binary: "docker",
    commands: EngineCommands {
        probe: &["version", "--format", "{{.Server.Version}}"],
        create: &["create"],
        start: &["start"],
        stop: &["stop"],
        remove: &["rm"],
        list: &["ps"],
        inspect: &["inspect"],
        exec: &["exec"],
        pull: &["pull"],
        stats: &["stats", "--no-stream", "--format", "{{json .}}"],
    },
    status_map: STATUS_MAP,
    supports_stats: true,
    supports_label_filters: true,
    starts_on_create: false,
    platform: None,
};
