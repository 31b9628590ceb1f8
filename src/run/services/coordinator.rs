//! Run coordination: provisioning, story bookkeeping, pull-request flow.

use crate::config::OrchestratorConfig;
use crate::engine::domain::{
    EngineError, EnvironmentConfig, EnvironmentStatus, ExecRequest, ExecutionEnvironment, labels,
};
use crate::engine::ports::ContainerEngine;
use crate::prd::domain::PrdDocument;
use crate::provider::domain::{CreatePullRequest, ProviderError, ProviderKind, PullRequest};
use crate::provider::ports::GitProvider;
use crate::run::domain::{Run, RunDomainError, RunId};
use minijinja::{Environment, context};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Grace period when stopping a run's environment during finalization.
const FINALIZE_STOP_TIMEOUT: Duration = Duration::from_secs(30);

/// Template rendering the pull-request body from run state.
const PULL_REQUEST_BODY_TEMPLATE: &str = "\
{{ description }}

## Stories

{% for story in stories -%}
- [{% if story.passes %}x{% else %} {% endif %}] {{ story.id }}: {{ story.title }}
{% endfor %}
{{ progress.passed }}/{{ progress.total }} stories passing, \
{{ progress.exhausted }} exhausted.
";

/// Service-level errors for run coordination.
#[derive(Debug, Error)]
pub enum RunCoordinatorError {
    /// Run state machine rejected the operation.
    #[error(transparent)]
    Domain(#[from] RunDomainError),
    /// Execution backend invocation failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Hosting provider rejected a request.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Pull-request body rendering failed.
    #[error("failed to render pull-request body: {0}")]
    Template(String),
    /// The configured provider set does not allow this provider.
    #[error("provider '{0}' is disabled by configuration")]
    ProviderDisabled(ProviderKind),
    /// The operation needs a provisioned environment.
    #[error("run {0} has no bound environment")]
    MissingEnvironment(RunId),
}

/// Result type for run coordination operations.
pub type RunCoordinatorResult<T> = Result<T, RunCoordinatorError>;

/// Options attached to a new run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Image override for the run's environment.
    pub image: Option<String>,
    /// User the run belongs to, stamped as a label.
    pub user: Option<String>,
    /// Project the run belongs to, stamped as a label.
    pub project: Option<String>,
}

/// Coordinates runs across the execution backend and hosting providers.
#[derive(Clone)]
pub struct RunCoordinator<E, C>
where
    E: ContainerEngine,
    C: Clock + Send + Sync,
{
    engine: Arc<E>,
    clock: Arc<C>,
    config: OrchestratorConfig,
}

impl<E, C> RunCoordinator<E, C>
where
    E: ContainerEngine,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator over an engine with configuration defaults.
    #[must_use]
    pub const fn new(engine: Arc<E>, clock: Arc<C>, config: OrchestratorConfig) -> Self {
        Self {
            engine,
            clock,
            config,
        }
    }

    /// Creates a pending run from a requirements document.
    #[must_use]
    pub fn create_run(&self, name: impl Into<String>, prd: PrdDocument) -> Run {
        Run::new(
            name,
            prd,
            self.config.default_provider,
            self.config.max_iterations,
            &*self.clock,
        )
    }

    /// Provisions the run's execution environment and starts the run.
    ///
    /// Builds the creation parameters from configuration defaults plus the
    /// run's ownership labels, creates (and if needed starts) the
    /// environment, and binds it to the run.
    ///
    /// # Errors
    ///
    /// Returns [`RunCoordinatorError`] when the state machine rejects
    /// provisioning or the engine invocation fails.
    pub async fn provision(
        &self,
        run: &mut Run,
        options: &RunOptions,
    ) -> RunCoordinatorResult<ExecutionEnvironment> {
        run.start_provisioning(&*self.clock)?;

        let environment_config = self.environment_config(run, options);
        let environment = match self.engine.create_container(&environment_config).await {
            Ok(environment) => environment,
            Err(err) => {
                run.fail(err.to_string(), &*self.clock)?;
                return Err(err.into());
            }
        };
        run.bind_environment(environment.id.clone(), &*self.clock)?;

        if environment.status != EnvironmentStatus::Running {
            self.engine.start_container(&environment.id).await?;
        }
        run.start(&*self.clock)?;
        run.record_progress(
            format!("environment {} provisioned", environment.id),
            &*self.clock,
        );
        info!(run = %run.id(), environment = %environment.id, "run provisioned");
        Ok(environment)
    }

    /// Renders the pull-request body from the run's story state.
    ///
    /// # Errors
    ///
    /// Returns [`RunCoordinatorError::Template`] when rendering fails.
    pub fn render_pull_request_body(&self, run: &Run) -> RunCoordinatorResult<String> {
        let mut templates = Environment::new();
        templates
            .add_template("pull_request_body", PULL_REQUEST_BODY_TEMPLATE)
            .map_err(|err| RunCoordinatorError::Template(err.to_string()))?;
        let template = templates
            .get_template("pull_request_body")
            .map_err(|err| RunCoordinatorError::Template(err.to_string()))?;
        template
            .render(context! {
                description => run.prd().description.as_str(),
                stories => run.stories(),
                progress => run.progress(),
            })
            .map_err(|err| RunCoordinatorError::Template(err.to_string()))
    }

    /// Opens the run's pull request against the given base branch.
    ///
    /// The request stays a draft until every story passes.
    ///
    /// # Errors
    ///
    /// Returns [`RunCoordinatorError`] when rendering or the provider call
    /// fails.
    pub async fn open_pull_request(
        &self,
        provider: &dyn GitProvider,
        run: &mut Run,
        base_branch: &str,
    ) -> RunCoordinatorResult<PullRequest> {
        if !self.config.provider_enabled(provider.kind()) {
            return Err(RunCoordinatorError::ProviderDisabled(provider.kind()));
        }
        let body = self.render_pull_request_body(run)?;
        let mut request = CreatePullRequest::new(
            run.prd().title.clone(),
            body,
            run.branch_name().to_owned(),
            base_branch.to_owned(),
        );
        if !run.progress().is_complete() {
            request = request.as_draft();
        }
        let pull_request = provider.create_pull_request(&request).await?;
        run.record_progress(
            format!("pull request #{} opened", pull_request.number),
            &*self.clock,
        );
        Ok(pull_request)
    }

    /// Runs the configured quality checks inside the run's environment.
    ///
    /// Each check is executed in turn and its outcome appended to the
    /// run's quality-check log. Returns whether every check passed.
    ///
    /// # Errors
    ///
    /// Returns [`RunCoordinatorError::MissingEnvironment`] when no
    /// environment is bound, or an engine error when an invocation itself
    /// fails (a check exiting non-zero is a recorded result, not an error).
    pub async fn run_quality_checks(&self, run: &mut Run) -> RunCoordinatorResult<bool> {
        let environment_id = run
            .environment_id()
            .cloned()
            .ok_or_else(|| RunCoordinatorError::MissingEnvironment(run.id()))?;

        let mut all_passed = true;
        let checks = self.config.quality_checks.clone();
        for check in &checks {
            let request =
                ExecRequest::new(vec!["sh".to_owned(), "-c".to_owned(), check.clone()]);
            let output = self.engine.exec(&environment_id, &request).await?;
            if output.success() {
                run.record_quality_check(format!("{check}: passed"), &*self.clock);
            } else {
                all_passed = false;
                run.record_quality_check(
                    format!("{check}: failed with exit code {}", output.exit_code),
                    &*self.clock,
                );
            }
        }
        Ok(all_passed)
    }

    /// Finalizes the run: stops its environment and settles the status.
    ///
    /// Completed when every story passes, failed otherwise. The stop is
    /// best-effort; the environment stays subject to reclaim either way.
    ///
    /// # Errors
    ///
    /// Returns [`RunCoordinatorError::Domain`] when the run is already
    /// terminal.
    pub async fn finalize(&self, run: &mut Run) -> RunCoordinatorResult<()> {
        if let Some(environment_id) = run.environment_id().cloned()
            && let Err(err) = self
                .engine
                .stop_container(&environment_id, FINALIZE_STOP_TIMEOUT)
                .await
        {
            run.record_progress(format!("environment stop failed: {err}"), &*self.clock);
        }

        let progress = run.progress();
        if progress.is_complete() {
            run.complete(&*self.clock)?;
        } else {
            run.fail(
                format!(
                    "{} of {} stories unresolved",
                    progress.total - progress.passed,
                    progress.total
                ),
                &*self.clock,
            )?;
        }
        Ok(())
    }

    /// Builds environment creation parameters for a run.
    fn environment_config(&self, run: &Run, options: &RunOptions) -> EnvironmentConfig {
        let image = options
            .image
            .clone()
            .unwrap_or_else(|| self.config.default_image.clone());
        let mut environment_config = EnvironmentConfig::new(format!("run-{}", run.id()), image)
            .with_resources(self.config.default_resources)
            .with_sandbox(self.config.default_sandbox.clone())
            .with_label(labels::MANAGED, labels::MANAGED_VALUE)
            .with_label(labels::RUN_ID, run.id().to_string())
            .with_label(labels::RUN_STATUS, labels::RUN_STATUS_RUNNING);
        if let Some(user) = &options.user {
            environment_config = environment_config.with_label(labels::USER, user.clone());
        }
        if let Some(project) = &options.project {
            environment_config = environment_config.with_label(labels::PROJECT, project.clone());
        }
        environment_config
    }
}
