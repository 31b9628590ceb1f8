//! The product requirements document aggregate.

use super::{PrdProgress, StoryNotFoundError, StoryPatch, UserStory};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a product requirements document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrdId(Uuid);

impl PrdId {
    /// Creates a new random document identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a document identifier from an existing UUID.
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

impl Default for PrdId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task specification decomposed into user stories.
///
/// The document owns its stories; run coordination works on a live copy and
/// folds results back through [`Self::update_story`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrdDocument {
    /// Document identifier.
    pub id: PrdId,
    /// Document title.
    pub title: String,
    /// What the work delivers.
    pub description: String,
    /// Semantic version of the document.
    pub version: String,
    /// Generated branch name for the run implementing this document.
    pub branch_name: String,
    /// Stories in delivery order.
    pub stories: Vec<UserStory>,
    /// Cross-cutting technical requirements, if any.
    pub technical_requirements: Vec<String>,
    /// External dependencies, if any.
    pub dependencies: Vec<String>,
}

impl PrdDocument {
    /// Returns the story with the given id, if present.
    #[must_use]
    pub fn story(&self, story_id: &str) -> Option<&UserStory> {
        self.stories.iter().find(|story| story.id == story_id)
    }

    /// Returns a new document with one story replaced through a patch.
    ///
    /// The receiver is left untouched; story mutation is a pure operation.
    ///
    /// # Errors
    ///
    /// Returns [`StoryNotFoundError`] when no story carries the id.
    pub fn update_story(
        &self,
        story_id: &str,
        patch: &StoryPatch,
    ) -> Result<Self, StoryNotFoundError> {
        if self.story(story_id).is_none() {
            return Err(StoryNotFoundError(story_id.to_owned()));
        }
        let mut updated = self.clone();
        for story in &mut updated.stories {
            if story.id == story_id {
                *story = patch.apply(story);
            }
        }
        Ok(updated)
    }

    /// Derives progress purely from the stories.
    ///
    /// There are no separate counters to keep in sync: passed, exhausted,
    /// and pending always partition the story list.
    #[must_use]
    pub fn progress(&self) -> PrdProgress {
        PrdProgress::derive(&self.stories)
    }
}
