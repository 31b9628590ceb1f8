//! Error and validation types for the document domain.

use thiserror::Error;

/// Error returned when a story id is absent from a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("story not found: {0}")]
pub struct StoryNotFoundError(pub String);

/// One structural problem found while validating a document.
///
/// Validation never fails mid-construction; problems are collected into a
/// list the caller can render or reject on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field (`stories[2].title`).
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ValidationIssue {
    /// Creates an issue for the given field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors returned while parsing a markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkdownParseError {
    /// The input has no `# <title>` heading.
    #[error("markdown document is missing a '# <title>' heading")]
    MissingTitle,

    /// A story heading is not in `### <id>: <title>` form.
    #[error("story heading '{0}' is not in '### <id>: <title>' form")]
    InvalidStoryHeading(String),
}
