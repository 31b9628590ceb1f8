//! Domain model for product requirements documents.
//!
//! A document decomposes one task into user stories with attempt and pass
//! tracking. Everything here is pure: story mutation returns a new
//! document, and progress is derived from the stories on demand.

mod document;
mod error;
mod progress;
mod story;

pub use document::{PrdDocument, PrdId};
pub use error::{MarkdownParseError, StoryNotFoundError, ValidationIssue};
pub use progress::PrdProgress;
pub use story::{
    DEFAULT_MAX_ATTEMPTS, ParseStoryPriorityError, StoryPatch, StoryPriority, UserStory,
};
