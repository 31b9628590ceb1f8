//! Backend profile for the lightweight-VM engine on Apple silicon.

use super::cli::{EngineCommands, EngineProfile, PlatformGate};
use crate::engine::domain::EnvironmentStatus;
use crate::engine::ports::EngineKind;

/// Native status vocabulary of the lightweight-VM engine.
pub(crate) const STATUS_MAP: &[(&str, EnvironmentStatus)] = &[
    ("creating", EnvironmentStatus::Created),
    ("created", EnvironmentStatus::Created),
    ("running", EnvironmentStatus::Running),
    ("stopping", EnvironmentStatus::Removing),
    ("stopped", EnvironmentStatus::Exited),
];

/// Profile driving the `container` binary.
///
/// Only ships on macOS/aarch64; the VM starts as part of `run`, so freshly
/// created environments report `running`. No stats endpoint: usage
/// snapshots are zeroed.
pub(crate) static PROFILE: EngineProfile = EngineProfile {
    kind: EngineKind::AppleContainer,
    binary: "container",
    commands: EngineCommands {
        probe: &["system", "status"],
        create: &["run", "--detach"],
        start: &["start"],
        stop: &["stop"],
        remove: &["rm"],
        list: &["list"],
        inspect: &["inspect"],
        exec: &["exec"],
        pull: &["image", "pull"],
        stats: &[],
    },
    status_map: STATUS_MAP,
    supports_stats: false,
    supports_label_filters: false,
    starts_on_create: true,
    platform: Some(PlatformGate {
        os: "macos",
        arch: "aarch64",
    }),
};
