//! Run aggregate: one execution of a requirements document.

use super::{LogEntry, RunDomainError};
use crate::engine::domain::EnvironmentId;
use crate::prd::domain::{PrdDocument, PrdProgress, StoryNotFoundError, StoryPatch, UserStory};
use crate::provider::domain::ProviderKind;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a new random run identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a run identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Run lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Created, environment not yet provisioned.
    Pending,
    /// Environment provisioning in progress.
    Initializing,
    /// Iterating against the stories.
    Running,
    /// Temporarily paused.
    Paused,
    /// Every story passed.
    Completed,
    /// Failed terminally.
    Failed,
    /// Cancelled before finishing.
    Cancelled,
}

impl RunStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Initializing => "initializing",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Whether the transition to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Initializing | Self::Cancelled)
                | (Self::Initializing, Self::Running | Self::Failed | Self::Cancelled)
                | (
                    Self::Running,
                    Self::Paused | Self::Completed | Self::Failed | Self::Cancelled
                )
                | (Self::Paused, Self::Running | Self::Failed | Self::Cancelled)
        )
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One execution of a requirements document against an isolated
/// environment and a source-control branch.
///
/// The run owns its document and a live copy of the stories. The
/// environment and the branch are referenced by id/name only — they are
/// owned by the execution backend and the hosting provider and are
/// reclaimed independently of this value's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    id: RunId,
    name: String,
    status: RunStatus,
    prd: PrdDocument,
    environment_id: Option<EnvironmentId>,
    current_iteration: u32,
    max_iterations: u32,
    branch_name: String,
    provider: ProviderKind,
    stories: Vec<UserStory>,
    progress_log: Vec<LogEntry>,
    quality_checks: Vec<LogEntry>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    error: Option<String>,
}

impl Run {
    /// Creates a pending run from a requirements document.
    ///
    /// The document's stories are copied into the run's live story list and
    /// its generated branch name becomes the run branch.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        prd: PrdDocument,
        provider: ProviderKind,
        max_iterations: u32,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        let stories = prd.stories.clone();
        let branch_name = prd.branch_name.clone();
        Self {
            id: RunId::new(),
            name: name.into(),
            status: RunStatus::Pending,
            prd,
            environment_id: None,
            current_iteration: 0,
            max_iterations,
            branch_name,
            provider,
            stories,
            progress_log: Vec::new(),
            quality_checks: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
            error: None,
        }
    }

    /// Returns the run identifier.
    #[must_use]
    pub const fn id(&self) -> RunId {
        self.id
    }

    /// Returns the run name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Returns the embedded requirements document.
    #[must_use]
    pub const fn prd(&self) -> &PrdDocument {
        &self.prd
    }

    /// Returns the bound environment id, if provisioned.
    #[must_use]
    pub const fn environment_id(&self) -> Option<&EnvironmentId> {
        self.environment_id.as_ref()
    }

    /// Returns the current iteration count.
    #[must_use]
    pub const fn current_iteration(&self) -> u32 {
        self.current_iteration
    }

    /// Returns the iteration ceiling.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Returns the source-control branch name.
    #[must_use]
    pub fn branch_name(&self) -> &str {
        &self.branch_name
    }

    /// Returns the hosting provider this run targets.
    #[must_use]
    pub const fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Returns the live story copies.
    #[must_use]
    pub fn stories(&self) -> &[UserStory] {
        &self.stories
    }

    /// Returns the append-only progress log.
    #[must_use]
    pub fn progress_log(&self) -> &[LogEntry] {
        &self.progress_log
    }

    /// Returns the append-only quality-check log.
    #[must_use]
    pub fn quality_checks(&self) -> &[LogEntry] {
        &self.quality_checks
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the terminal error, if the run failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Derives story progress from the live copies.
    #[must_use]
    pub fn progress(&self) -> PrdProgress {
        PrdProgress::derive(&self.stories)
    }

    /// Binds the provisioned environment to this run.
    ///
    /// # Errors
    ///
    /// Returns [`RunDomainError::EnvironmentAlreadyBound`] when an
    /// environment is already set.
    pub fn bind_environment(
        &mut self,
        environment_id: EnvironmentId,
        clock: &impl Clock,
    ) -> Result<(), RunDomainError> {
        if self.environment_id.is_some() {
            return Err(RunDomainError::EnvironmentAlreadyBound(self.id));
        }
        self.environment_id = Some(environment_id);
        self.touch(clock);
        Ok(())
    }

    /// Moves the run into `Initializing` when provisioning begins.
    ///
    /// # Errors
    ///
    /// Returns [`RunDomainError::InvalidTransition`] when the current state
    /// does not allow it.
    pub fn start_provisioning(&mut self, clock: &impl Clock) -> Result<(), RunDomainError> {
        self.transition(RunStatus::Initializing, clock)
    }

    /// Moves the run into `Running`.
    ///
    /// # Errors
    ///
    /// Returns [`RunDomainError::InvalidTransition`] when the current state
    /// does not allow it.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), RunDomainError> {
        self.transition(RunStatus::Running, clock)
    }

    /// Pauses a running run.
    ///
    /// # Errors
    ///
    /// Returns [`RunDomainError::InvalidTransition`] when the current state
    /// does not allow it.
    pub fn pause(&mut self, clock: &impl Clock) -> Result<(), RunDomainError> {
        self.transition(RunStatus::Paused, clock)
    }

    /// Resumes a paused run.
    ///
    /// # Errors
    ///
    /// Returns [`RunDomainError::InvalidTransition`] when the current state
    /// does not allow it.
    pub fn resume(&mut self, clock: &impl Clock) -> Result<(), RunDomainError> {
        self.transition(RunStatus::Running, clock)
    }

    /// Marks the run completed.
    ///
    /// # Errors
    ///
    /// Returns [`RunDomainError::InvalidTransition`] when the current state
    /// does not allow it.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), RunDomainError> {
        self.transition(RunStatus::Completed, clock)
    }

    /// Marks the run failed with a terminal error.
    ///
    /// # Errors
    ///
    /// Returns [`RunDomainError::InvalidTransition`] when the current state
    /// does not allow it.
    pub fn fail(
        &mut self,
        error: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), RunDomainError> {
        self.transition(RunStatus::Failed, clock)?;
        self.error = Some(error.into());
        Ok(())
    }

    /// Cancels the run.
    ///
    /// # Errors
    ///
    /// Returns [`RunDomainError::InvalidTransition`] when the run is
    /// already terminal.
    pub fn cancel(&mut self, clock: &impl Clock) -> Result<(), RunDomainError> {
        self.transition(RunStatus::Cancelled, clock)
    }

    /// Starts the next iteration.
    ///
    /// # Errors
    ///
    /// Returns [`RunDomainError::InvalidTransition`] unless the run is
    /// running, or [`RunDomainError::IterationLimitReached`] at the
    /// ceiling.
    pub fn begin_iteration(&mut self, clock: &impl Clock) -> Result<u32, RunDomainError> {
        if self.status != RunStatus::Running {
            return Err(RunDomainError::InvalidTransition {
                from: self.status,
                to: RunStatus::Running,
            });
        }
        if self.current_iteration >= self.max_iterations {
            return Err(RunDomainError::IterationLimitReached(self.max_iterations));
        }
        self.current_iteration += 1;
        self.touch(clock);
        Ok(self.current_iteration)
    }

    /// Appends one progress-log entry.
    pub fn record_progress(&mut self, message: impl Into<String>, clock: &impl Clock) {
        let entry = LogEntry::new(message, clock.utc());
        self.progress_log.push(entry);
        self.touch(clock);
    }

    /// Appends one quality-check-log entry.
    pub fn record_quality_check(&mut self, message: impl Into<String>, clock: &impl Clock) {
        let entry = LogEntry::new(message, clock.utc());
        self.quality_checks.push(entry);
        self.touch(clock);
    }

    /// Applies a story result to the live story copy.
    ///
    /// # Errors
    ///
    /// Returns [`StoryNotFoundError`] when no live story carries the id.
    pub fn apply_story_result(
        &mut self,
        story_id: &str,
        patch: &StoryPatch,
        clock: &impl Clock,
    ) -> Result<(), StoryNotFoundError> {
        let story = self
            .stories
            .iter_mut()
            .find(|candidate| candidate.id == story_id)
            .ok_or_else(|| StoryNotFoundError(story_id.to_owned()))?;
        *story = patch.apply(story);
        self.touch(clock);
        Ok(())
    }

    /// Validated state transition.
    fn transition(&mut self, next: RunStatus, clock: &impl Clock) -> Result<(), RunDomainError> {
        if !self.status.can_transition_to(next) {
            return Err(RunDomainError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
