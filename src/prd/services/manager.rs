//! Document construction, validation, and catalog operations.

use super::branch_name::generate_branch_name;
use super::markdown;
use super::templates::{self, PrdTemplate};
use crate::prd::domain::{
    MarkdownParseError, PrdDocument, PrdId, UserStory, ValidationIssue,
};
use thiserror::Error;

/// Initial semantic version assigned to new documents.
const INITIAL_VERSION: &str = "1.0.0";

/// Errors returned by document construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrdManagerError {
    /// The requested template id is not in the catalog.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

/// Catalog, construction, validation, and import/export operations for
/// requirements documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrdManager;

impl PrdManager {
    /// Creates a manager.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the full template catalog.
    #[must_use]
    pub const fn templates(&self) -> &'static [PrdTemplate] {
        templates::TEMPLATES
    }

    /// Looks a template up by catalog id.
    #[must_use]
    pub fn template(&self, id: &str) -> Option<&'static PrdTemplate> {
        templates::template_by_id(id)
    }

    /// Returns every template in a category.
    #[must_use]
    pub fn templates_in_category(&self, category: &str) -> Vec<&'static PrdTemplate> {
        templates::templates_by_category(category)
    }

    /// Builds a document from a catalog template.
    ///
    /// Template stories are cloned and their ids re-prefixed with the new
    /// document's id; tracking state starts fresh.
    ///
    /// # Errors
    ///
    /// Returns [`PrdManagerError::UnknownTemplate`] when the id is not in
    /// the catalog.
    pub fn create_from_template(
        &self,
        template_id: &str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<PrdDocument, PrdManagerError> {
        let template = self
            .template(template_id)
            .ok_or_else(|| PrdManagerError::UnknownTemplate(template_id.to_owned()))?;
        let id = PrdId::new();
        let stories = template
            .stories
            .iter()
            .enumerate()
            .map(|(index, story)| {
                UserStory::new(
                    format!("{id}-s{}", index + 1),
                    story.title,
                    story.description,
                    story.acceptance_criteria.iter().map(|c| (*c).to_owned()),
                )
                .with_priority(story.priority)
            })
            .collect();

        let document_title = title.into();
        let branch_name = generate_branch_name(&document_title);
        Ok(PrdDocument {
            id,
            title: document_title,
            description: description.into(),
            version: INITIAL_VERSION.to_owned(),
            branch_name,
            stories,
            technical_requirements: template
                .technical_requirements
                .iter()
                .map(|req| (*req).to_owned())
                .collect(),
            dependencies: Vec::new(),
        })
    }

    /// Builds a document from caller-supplied stories.
    #[must_use]
    pub fn create(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        stories: impl IntoIterator<Item = UserStory>,
    ) -> PrdDocument {
        let document_title = title.into();
        let branch_name = generate_branch_name(&document_title);
        PrdDocument {
            id: PrdId::new(),
            title: document_title,
            description: description.into(),
            version: INITIAL_VERSION.to_owned(),
            branch_name,
            stories: stories.into_iter().collect(),
            technical_requirements: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Validates a document's structure.
    ///
    /// Never fails mid-check: every problem found is collected. An empty
    /// list means the document is structurally sound.
    #[must_use]
    pub fn validate(&self, document: &PrdDocument) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if document.title.trim().is_empty() {
            issues.push(ValidationIssue::new("title", "title must not be empty"));
        }
        if document.description.trim().is_empty() {
            issues.push(ValidationIssue::new(
                "description",
                "description must not be empty",
            ));
        }
        if document.stories.is_empty() {
            issues.push(ValidationIssue::new(
                "stories",
                "a document needs at least one story",
            ));
        }
        for (index, story) in document.stories.iter().enumerate() {
            if story.title.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("stories[{index}].title"),
                    "story title must not be empty",
                ));
            }
            if story.description.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("stories[{index}].description"),
                    "story description must not be empty",
                ));
            }
            if story.acceptance_criteria.is_empty() {
                issues.push(ValidationIssue::new(
                    format!("stories[{index}].acceptance_criteria"),
                    "a story needs at least one acceptance criterion",
                ));
            }
        }
        issues
    }

    /// Renders a document to markdown.
    #[must_use]
    pub fn to_markdown(&self, document: &PrdDocument) -> String {
        markdown::to_markdown(document)
    }

    /// Parses a markdown document.
    ///
    /// # Errors
    ///
    /// Returns a [`MarkdownParseError`] when the input has no title heading
    /// or a malformed story heading.
    pub fn parse_markdown(&self, input: &str) -> Result<PrdDocument, MarkdownParseError> {
        markdown::parse_markdown(input)
    }
}
