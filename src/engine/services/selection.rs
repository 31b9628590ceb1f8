//! Engine selection: explicit choice or availability-probed auto mode.

use crate::engine::adapters::CliEngine;
use crate::engine::ports::{ContainerEngine, EngineKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Which execution backend to use, from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineChoice {
    /// Probe the backends in priority order and take the first available.
    #[default]
    Auto,
    /// Require the general container engine.
    Docker,
    /// Require the drop-in compatible daemonless engine.
    Podman,
    /// Require the lightweight-VM engine on Apple silicon.
    AppleContainer,
}

/// Errors from engine selection.
#[derive(Debug, Error)]
pub enum EngineSelectionError {
    /// The explicitly requested engine failed its availability probe.
    #[error("requested engine '{0}' is not available on this host")]
    Unavailable(EngineKind),

    /// No candidate engine passed its availability probe.
    #[error("no execution backend is available on this host")]
    NoneAvailable,
}

/// Returns the first candidate whose availability probe succeeds.
///
/// Candidates are probed strictly in the order given; the probe never
/// errors, so an unreachable engine simply yields to the next one.
pub async fn first_available(
    candidates: Vec<Arc<dyn ContainerEngine>>,
) -> Option<Arc<dyn ContainerEngine>> {
    for candidate in candidates {
        if candidate.is_available().await {
            return Some(candidate);
        }
    }
    None
}

/// Selects an execution backend per the configured choice.
///
/// `Auto` probes docker, then podman, then the lightweight-VM engine, and
/// takes the first that answers. Explicit choices are still probed so a
/// misconfigured host fails fast with a typed error.
///
/// # Errors
///
/// Returns [`EngineSelectionError::Unavailable`] when an explicitly chosen
/// engine fails its probe, or [`EngineSelectionError::NoneAvailable`] when
/// auto mode exhausts every candidate.
pub async fn select_engine(
    choice: EngineChoice,
) -> Result<Arc<dyn ContainerEngine>, EngineSelectionError> {
    match choice {
        EngineChoice::Auto => {
            let candidates: Vec<Arc<dyn ContainerEngine>> = vec![
                Arc::new(CliEngine::docker()),
                Arc::new(CliEngine::podman()),
                Arc::new(CliEngine::apple_container()),
            ];
            let selected = first_available(candidates)
                .await
                .ok_or(EngineSelectionError::NoneAvailable)?;
            info!(engine = %selected.kind(), "auto-selected execution backend");
            Ok(selected)
        }
        EngineChoice::Docker => require(Arc::new(CliEngine::docker())).await,
        EngineChoice::Podman => require(Arc::new(CliEngine::podman())).await,
        EngineChoice::AppleContainer => require(Arc::new(CliEngine::apple_container())).await,
    }
}

/// Probes one explicitly chosen engine.
async fn require(
    engine: Arc<dyn ContainerEngine>,
) -> Result<Arc<dyn ContainerEngine>, EngineSelectionError> {
    if engine.is_available().await {
        Ok(engine)
    } else {
        Err(EngineSelectionError::Unavailable(engine.kind()))
    }
}
