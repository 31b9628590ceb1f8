//! Immutable creation parameters for execution environments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label keys stamped onto every environment this system creates.
pub mod labels {
    /// Ownership marker; the value is always [`MANAGED_VALUE`].
    pub const MANAGED: &str = "stevedore.managed";
    /// Value of the [`MANAGED`] label.
    pub const MANAGED_VALUE: &str = "true";
    /// Identifier of the run the environment was created for.
    pub const RUN_ID: &str = "stevedore.run.id";
    /// Last recorded run outcome (`running`, `completed`, `failed`).
    pub const RUN_STATUS: &str = "stevedore.run.status";
    /// [`RUN_STATUS`] value for a run still in progress.
    pub const RUN_STATUS_RUNNING: &str = "running";
    /// [`RUN_STATUS`] value for a run that finished successfully.
    pub const RUN_STATUS_COMPLETED: &str = "completed";
    /// [`RUN_STATUS`] value for a run that failed.
    pub const RUN_STATUS_FAILED: &str = "failed";
    /// User the run belongs to.
    pub const USER: &str = "stevedore.user";
    /// Project the run belongs to.
    pub const PROJECT: &str = "stevedore.project";
}

/// A bind mount from the host into the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMount {
    /// Host path or named volume.
    pub source: String,
    /// Mount point inside the environment.
    pub target: String,
    /// Mount mode (`ro` or `rw`).
    pub mode: MountMode,
}

/// Access mode for a volume mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountMode {
    /// Read-only mount.
    ReadOnly,
    /// Read-write mount.
    ReadWrite,
}

impl MountMode {
    /// Returns the engine flag spelling (`ro`/`rw`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "ro",
            Self::ReadWrite => "rw",
        }
    }
}

/// Resource ceilings applied at environment creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Relative CPU weight (engine default when absent).
    pub cpu_shares: Option<u64>,
    /// Number of CPU cores, in thousandths (1500 = 1.5 cores).
    pub milli_cpus: Option<u64>,
    /// Hard memory ceiling in bytes.
    pub memory_limit_bytes: Option<u64>,
    /// Soft memory reservation in bytes.
    pub memory_reservation_bytes: Option<u64>,
    /// Maximum number of processes.
    pub pids_limit: Option<u64>,
}

/// Network attachment for the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkMode {
    /// Engine-default bridged network.
    #[default]
    Bridge,
    /// Share the host network namespace.
    Host,
    /// No network access.
    None,
    /// A named engine network.
    Custom(String),
}

impl NetworkMode {
    /// Returns the engine flag spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bridge => "bridge",
            Self::Host => "host",
            Self::None => "none",
            Self::Custom(name) => name,
        }
    }
}

/// Sandbox hardening applied at environment creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxFlags {
    /// Mount the root filesystem read-only.
    pub read_only_rootfs: bool,
    /// Linux capabilities to drop (`ALL` drops everything).
    pub cap_drop: Vec<String>,
    /// Linux capabilities to re-add after drops.
    pub cap_add: Vec<String>,
    /// Forbid privilege escalation inside the environment.
    pub no_new_privileges: bool,
    /// Mandatory-access-control profile name (AppArmor/SELinux), if any.
    pub mac_profile: Option<String>,
    /// `user[:group]` to run as, if not the image default.
    pub run_as: Option<String>,
}

impl Default for SandboxFlags {
    fn default() -> Self {
        Self {
            read_only_rootfs: false,
            cap_drop: vec!["ALL".to_owned()],
            cap_add: Vec::new(),
            no_new_privileges: true,
            mac_profile: None,
            run_as: None,
        }
    }
}

/// Immutable creation parameters for one execution environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Caller-assigned name, unique per engine.
    pub name: String,
    /// Image reference to create from.
    pub image: String,
    /// Command to run, empty for the image default.
    pub command: Vec<String>,
    /// Environment variables.
    pub env: BTreeMap<String, String>,
    /// Bind mounts.
    pub mounts: Vec<VolumeMount>,
    /// Resource ceilings.
    pub resources: ResourceLimits,
    /// Network attachment.
    pub network: NetworkMode,
    /// Sandbox hardening.
    pub sandbox: SandboxFlags,
    /// Labels stamped onto the environment.
    pub labels: BTreeMap<String, String>,
    /// Working directory inside the environment, if any.
    pub working_dir: Option<String>,
}

impl EnvironmentConfig {
    /// Creates a config with required fields and sandbox defaults.
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            command: Vec::new(),
            env: BTreeMap::new(),
            mounts: Vec::new(),
            resources: ResourceLimits::default(),
            network: NetworkMode::default(),
            sandbox: SandboxFlags::default(),
            labels: BTreeMap::new(),
            working_dir: None,
        }
    }

    /// Sets the command to run.
    #[must_use]
    pub fn with_command(mut self, command: impl IntoIterator<Item = String>) -> Self {
        self.command = command.into_iter().collect();
        self
    }

    /// Adds one environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Adds one bind mount.
    #[must_use]
    pub fn with_mount(mut self, mount: VolumeMount) -> Self {
        self.mounts.push(mount);
        self
    }

    /// Sets resource ceilings.
    #[must_use]
    pub const fn with_resources(mut self, resources: ResourceLimits) -> Self {
        self.resources = resources;
        self
    }

    /// Sets the network attachment.
    #[must_use]
    pub fn with_network(mut self, network: NetworkMode) -> Self {
        self.network = network;
        self
    }

    /// Sets sandbox hardening flags.
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: SandboxFlags) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Adds one label.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Listing filter for [`crate::engine::ports::ContainerEngine::list_containers`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvironmentFilter {
    /// Label selectors every returned environment must match.
    pub label_selectors: BTreeMap<String, String>,
    /// Include environments whose process is not running.
    pub include_stopped: bool,
}

impl EnvironmentFilter {
    /// Filter matching every environment this system owns, stopped included.
    #[must_use]
    pub fn managed() -> Self {
        let mut label_selectors = BTreeMap::new();
        label_selectors.insert(labels::MANAGED.to_owned(), labels::MANAGED_VALUE.to_owned());
        Self {
            label_selectors,
            include_stopped: true,
        }
    }

    /// Adds one label selector.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.label_selectors.insert(key.into(), value.into());
        self
    }
}
