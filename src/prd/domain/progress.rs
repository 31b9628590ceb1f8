//! Derived story-progress aggregation.

use super::UserStory;
use serde::{Deserialize, Serialize};

/// Story progress for one document, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrdProgress {
    /// Total number of stories.
    pub total: usize,
    /// Stories whose acceptance criteria pass.
    pub passed: usize,
    /// Stories that failed through their attempt ceiling.
    pub exhausted: usize,
    /// Stories still in play.
    pub pending: usize,
}

impl PrdProgress {
    /// Derives progress from a story list.
    ///
    /// `passed + exhausted + pending == total` holds for every input.
    #[must_use]
    pub fn derive(stories: &[UserStory]) -> Self {
        let total = stories.len();
        let passed = stories.iter().filter(|story| story.is_resolved()).count();
        let exhausted = stories.iter().filter(|story| story.is_exhausted()).count();
        Self {
            total,
            passed,
            exhausted,
            pending: total - passed - exhausted,
        }
    }

    /// Whether every story passes.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.passed == self.total
    }

    /// Whether no story can make further progress.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.pending == 0
    }
}
