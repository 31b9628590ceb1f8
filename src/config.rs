//! Configuration consumed from the surrounding system.
//!
//! This crate owns no config file or CLI surface; the embedding application
//! supplies one of these values (deserialized from wherever it keeps
//! configuration) and passes it in.

use crate::engine::domain::{ResourceLimits, SandboxFlags};
use crate::engine::services::EngineChoice;
use crate::gc::domain::GcPolicy;
use crate::provider::domain::ProviderKind;
use serde::{Deserialize, Serialize};

/// Per-provider enablement switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderToggles {
    /// Allow the pull-request-based provider.
    pub github: bool,
    /// Allow the merge-request-based provider.
    pub gitlab: bool,
}

impl Default for ProviderToggles {
    fn default() -> Self {
        Self {
            github: true,
            gitlab: true,
        }
    }
}

/// Top-level configuration for the orchestration engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Which execution backend to use.
    pub engine: EngineChoice,
    /// Image environments are created from when a run specifies none.
    pub default_image: String,
    /// Resource ceilings applied to new environments.
    pub default_resources: ResourceLimits,
    /// Sandbox hardening applied to new environments.
    pub default_sandbox: SandboxFlags,
    /// Reclaim policy.
    pub gc: GcPolicy,
    /// Provider used when a run does not name one.
    pub default_provider: ProviderKind,
    /// Per-provider enablement.
    pub providers: ProviderToggles,
    /// Iteration ceiling for new runs.
    pub max_iterations: u32,
    /// Quality checks every iteration must pass.
    pub quality_checks: Vec<String>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            engine: EngineChoice::Auto,
            default_image: "ubuntu:24.04".to_owned(),
            default_resources: ResourceLimits {
                milli_cpus: Some(2000),
                memory_limit_bytes: Some(4 * 1024 * 1024 * 1024),
                pids_limit: Some(512),
                ..ResourceLimits::default()
            },
            default_sandbox: SandboxFlags::default(),
            gc: GcPolicy::default(),
            default_provider: ProviderKind::GitHub,
            providers: ProviderToggles::default(),
            max_iterations: 10,
            quality_checks: vec![
                "lint".to_owned(),
                "typecheck".to_owned(),
                "test".to_owned(),
            ],
        }
    }
}

impl OrchestratorConfig {
    /// Whether the given provider is enabled.
    #[must_use]
    pub const fn provider_enabled(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::GitHub => self.providers.github,
            ProviderKind::GitLab => self.providers.gitlab,
        }
    }
}
