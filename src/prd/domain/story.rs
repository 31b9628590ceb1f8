//! User stories: acceptance-criteria-bounded units of work.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default attempt ceiling for a new story.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delivery priority of a user story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryPriority {
    /// Nice to have.
    Low,
    /// Standard priority.
    #[default]
    Medium,
    /// Should land before medium work.
    High,
    /// Blocks the run outcome.
    Critical,
}

impl StoryPriority {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for StoryPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing story priorities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown story priority: {0}")]
pub struct ParseStoryPriorityError(pub String);

impl TryFrom<&str> for StoryPriority {
    type Error = ParseStoryPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseStoryPriorityError(value.to_owned())),
        }
    }
}

/// One acceptance-criteria-bounded unit of work with attempt tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStory {
    /// Story identifier, prefixed with its owning document's id.
    pub id: String,
    /// Short imperative title.
    pub title: String,
    /// What the story delivers and why.
    pub description: String,
    /// Ordered acceptance criteria; all must hold for the story to pass.
    pub acceptance_criteria: Vec<String>,
    /// Delivery priority.
    pub priority: StoryPriority,
    /// Whether the story's acceptance criteria currently pass.
    pub passes: bool,
    /// Iterations spent on this story so far.
    pub attempts: u32,
    /// Attempt ceiling before the story counts as exhausted.
    pub max_attempts: u32,
    /// Most recent failure, if any.
    pub last_error: Option<String>,
    /// Freeform effort estimate, if any.
    pub estimate: Option<String>,
}

impl UserStory {
    /// Creates a fresh story with default tracking state.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        acceptance_criteria: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            acceptance_criteria: acceptance_criteria.into_iter().collect(),
            priority: StoryPriority::default(),
            passes: false,
            attempts: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            last_error: None,
            estimate: None,
        }
    }

    /// Sets the delivery priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: StoryPriority) -> Self {
        self.priority = priority;
        self
    }

    /// A story is resolved exactly when its criteria pass.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.passes
    }

    /// A story is exhausted when it failed through its attempt ceiling.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts && !self.passes
    }
}

/// Partial story update applied by
/// [`crate::prd::domain::PrdDocument::update_story`].
///
/// Absent fields leave the story untouched; `last_error` and `estimate`
/// replace the whole optional value when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New acceptance criteria.
    pub acceptance_criteria: Option<Vec<String>>,
    /// New priority.
    pub priority: Option<StoryPriority>,
    /// New pass state.
    pub passes: Option<bool>,
    /// New attempt count.
    pub attempts: Option<u32>,
    /// New attempt ceiling.
    pub max_attempts: Option<u32>,
    /// New most-recent failure.
    pub last_error: Option<Option<String>>,
    /// New effort estimate.
    pub estimate: Option<Option<String>>,
}

impl StoryPatch {
    /// Patch that marks a story passed and clears its failure.
    #[must_use]
    pub fn passed() -> Self {
        Self {
            passes: Some(true),
            last_error: Some(None),
            ..Self::default()
        }
    }

    /// Patch that records one failed attempt.
    #[must_use]
    pub fn failed_attempt(attempts: u32, error: impl Into<String>) -> Self {
        Self {
            attempts: Some(attempts),
            last_error: Some(Some(error.into())),
            ..Self::default()
        }
    }

    /// Applies this patch to a story, producing the updated story.
    #[must_use]
    pub fn apply(&self, story: &UserStory) -> UserStory {
        let mut updated = story.clone();
        if let Some(title) = &self.title {
            updated.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            updated.description.clone_from(description);
        }
        if let Some(criteria) = &self.acceptance_criteria {
            updated.acceptance_criteria.clone_from(criteria);
        }
        if let Some(priority) = self.priority {
            updated.priority = priority;
        }
        if let Some(passes) = self.passes {
            updated.passes = passes;
        }
        if let Some(attempts) = self.attempts {
            updated.attempts = attempts;
        }
        if let Some(max_attempts) = self.max_attempts {
            updated.max_attempts = max_attempts;
        }
        if let Some(last_error) = &self.last_error {
            updated.last_error.clone_from(last_error);
        }
        if let Some(estimate) = &self.estimate {
            updated.estimate.clone_from(estimate);
        }
        updated
    }
}
