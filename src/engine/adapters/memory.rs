//! In-process execution backend for tests and embedding.

use crate::engine::domain::{
    EngineError, EngineResult, EnvironmentConfig, EnvironmentFilter, EnvironmentId,
    EnvironmentName, EnvironmentStats, EnvironmentStatus, ExecOutput, ExecRequest,
    ExecutionEnvironment,
};
use crate::engine::ports::{ContainerEngine, EngineKind};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use uuid::Uuid;

/// Thread-safe in-process engine.
///
/// Implements the full backend contract against an in-memory table, so
/// reclaim sweeps and run coordination can be exercised without an engine
/// binary. Environments are regular snapshots; test setups may insert them
/// directly with arbitrary timestamps and labels.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngine {
    state: Arc<RwLock<InMemoryEngineState>>,
}

#[derive(Debug, Default)]
struct InMemoryEngineState {
    environments: BTreeMap<String, ExecutionEnvironment>,
    pulled_images: Vec<String>,
    available: Availability,
}

#[derive(Debug)]
struct Availability(bool);

impl Default for Availability {
    fn default() -> Self {
        Self(true)
    }
}

/// Poisoned-lock failures surface as invocation errors; the engine binary
/// equivalent is a crashed daemon.
fn lock_error(context: &str) -> EngineError {
    EngineError::UnexpectedOutput {
        reason: format!("in-memory engine state poisoned during {context}"),
    }
}

impl InMemoryEngine {
    /// Creates an empty in-process engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine whose availability probe reports the given value.
    #[must_use]
    pub fn with_availability(available: bool) -> Self {
        let engine = Self::default();
        if let Ok(mut state) = engine.state.write() {
            state.available = Availability(available);
        }
        engine
    }

    /// Inserts a pre-built environment snapshot, replacing any existing one
    /// with the same id.
    pub fn insert_environment(&self, environment: ExecutionEnvironment) {
        if let Ok(mut state) = self.state.write() {
            state
                .environments
                .insert(environment.id.as_str().to_owned(), environment);
        }
    }

    /// Overwrites one label on an existing environment.
    pub fn set_label(&self, id: &EnvironmentId, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut state) = self.state.write()
            && let Some(env) = state.environments.get_mut(id.as_str())
        {
            env.labels.insert(key.into(), value.into());
        }
    }

    /// Returns the ids currently known to the engine.
    #[must_use]
    pub fn known_ids(&self) -> Vec<String> {
        self.state
            .read()
            .map(|state| state.environments.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the images pulled so far.
    #[must_use]
    pub fn pulled_images(&self) -> Vec<String> {
        self.state
            .read()
            .map(|state| state.pulled_images.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContainerEngine for InMemoryEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::InMemory
    }

    async fn is_available(&self) -> bool {
        self.state.read().map(|state| state.available.0).unwrap_or(false)
    }

    async fn create_container(
        &self,
        config: &EnvironmentConfig,
    ) -> EngineResult<ExecutionEnvironment> {
        self.pull_image(&config.image).await?;
        let mut state = self.state.write().map_err(|_| lock_error("create"))?;
        let duplicate = state
            .environments
            .values()
            .any(|env| env.name.as_str() == config.name);
        if duplicate {
            return Err(EngineError::Invocation {
                command: format!("create --name {}", config.name),
                status: 125,
                stderr: format!("environment name '{}' is already in use", config.name),
            });
        }

        let environment = ExecutionEnvironment {
            id: EnvironmentId::new(Uuid::new_v4().simple().to_string()),
            name: EnvironmentName::new(config.name.clone()),
            image: config.image.clone(),
            status: EnvironmentStatus::Created,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
            exit_code: None,
            labels: config.labels.clone(),
        };
        state
            .environments
            .insert(environment.id.as_str().to_owned(), environment.clone());
        Ok(environment)
    }

    async fn start_container(&self, id: &EnvironmentId) -> EngineResult<()> {
        let mut state = self.state.write().map_err(|_| lock_error("start"))?;
        let env = state
            .environments
            .get_mut(id.as_str())
            .ok_or_else(|| EngineError::NotFound(id.clone()))?;
        env.status = EnvironmentStatus::Running;
        env.started_at = Some(Utc::now());
        env.finished_at = None;
        env.exit_code = None;
        Ok(())
    }

    async fn stop_container(&self, id: &EnvironmentId, _timeout: Duration) -> EngineResult<()> {
        let mut state = self.state.write().map_err(|_| lock_error("stop"))?;
        let env = state
            .environments
            .get_mut(id.as_str())
            .ok_or_else(|| EngineError::NotFound(id.clone()))?;
        if env.status.is_running() || env.status == EnvironmentStatus::Paused {
            env.status = EnvironmentStatus::Exited;
            env.finished_at = Some(Utc::now());
            env.exit_code = Some(0);
        }
        Ok(())
    }

    async fn remove_container(&self, id: &EnvironmentId, _force: bool) -> EngineResult<()> {
        let mut state = self.state.write().map_err(|_| lock_error("remove"))?;
        // Unknown ids are a no-op so racing removals stay idempotent.
        state.environments.remove(id.as_str());
        Ok(())
    }

    async fn list_containers(&self, filter: &EnvironmentFilter) -> Vec<ExecutionEnvironment> {
        self.state
            .read()
            .map(|state| {
                state
                    .environments
                    .values()
                    .filter(|env| filter.include_stopped || env.status.is_running())
                    .filter(|env| {
                        filter.label_selectors.iter().all(|(key, value)| {
                            env.labels.get(key).is_some_and(|found| found == value)
                        })
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn get_container(
        &self,
        id: &EnvironmentId,
    ) -> EngineResult<Option<ExecutionEnvironment>> {
        let state = self.state.read().map_err(|_| lock_error("inspect"))?;
        Ok(state.environments.get(id.as_str()).cloned())
    }

    async fn get_stats(&self, id: &EnvironmentId) -> EngineResult<EnvironmentStats> {
        let state = self.state.read().map_err(|_| lock_error("stats"))?;
        if state.environments.contains_key(id.as_str()) {
            Ok(EnvironmentStats::default())
        } else {
            Err(EngineError::NotFound(id.clone()))
        }
    }

    async fn exec(&self, id: &EnvironmentId, request: &ExecRequest) -> EngineResult<ExecOutput> {
        let state = self.state.read().map_err(|_| lock_error("exec"))?;
        let env = state
            .environments
            .get(id.as_str())
            .ok_or_else(|| EngineError::NotFound(id.clone()))?;
        if env.status.is_running() {
            Ok(ExecOutput {
                exit_code: 0,
                stdout: format!("exec: {}", request.command.join(" ")),
                stderr: String::new(),
            })
        } else {
            Err(EngineError::Invocation {
                command: format!("exec {}", id.as_str()),
                status: 126,
                stderr: format!("environment {} is not running", id.as_str()),
            })
        }
    }

    async fn pull_image(&self, image: &str) -> EngineResult<()> {
        let mut state = self.state.write().map_err(|_| lock_error("pull"))?;
        let already_present = state.pulled_images.iter().any(|pulled| pulled == image);
        if !already_present {
            state.pulled_images.push(image.to_owned());
        }
        Ok(())
    }
}
