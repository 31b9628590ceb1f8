//! Built-in document template catalog.
//!
//! Templates are pure data; building a document from one clones the stories
//! and re-prefixes their ids with the new document's id.

use crate::prd::domain::StoryPriority;

/// One story blueprint inside a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateStory {
    /// Story title.
    pub title: &'static str,
    /// Story description.
    pub description: &'static str,
    /// Acceptance criteria.
    pub acceptance_criteria: &'static [&'static str],
    /// Delivery priority.
    pub priority: StoryPriority,
}

/// A reusable document blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrdTemplate {
    /// Catalog identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Catalog category.
    pub category: &'static str,
    /// What the template is for.
    pub description: &'static str,
    /// Story blueprints.
    pub stories: &'static [TemplateStory],
    /// Default technical requirements.
    pub technical_requirements: &'static [&'static str],
}

/// The built-in template catalog.
pub const TEMPLATES: &[PrdTemplate] = &[
    PrdTemplate {
        id: "api-service",
        name: "API service",
        category: "backend",
        description: "A small HTTP API service with persistence.",
        stories: &[
            TemplateStory {
                title: "Expose CRUD endpoints",
                description: "Implement create, read, update, and delete endpoints \
                              for the primary resource.",
                acceptance_criteria: &[
                    "Each endpoint returns the documented status codes",
                    "Invalid payloads are rejected with a structured error body",
                ],
                priority: StoryPriority::High,
            },
            TemplateStory {
                title: "Persist resources durably",
                description: "Back the endpoints with a durable store and cover the \
                              data layer with integration tests.",
                acceptance_criteria: &[
                    "Resources survive a service restart",
                    "Data-layer tests run in the default test suite",
                ],
                priority: StoryPriority::Medium,
            },
        ],
        technical_requirements: &["Expose a health endpoint", "Log requests with latency"],
    },
    PrdTemplate {
        id: "web-app",
        name: "Web application",
        category: "frontend",
        description: "A browser application talking to an existing API.",
        stories: &[
            TemplateStory {
                title: "Render the primary list view",
                description: "Fetch and render the primary resource collection with \
                              loading and error states.",
                acceptance_criteria: &[
                    "The list renders from live API data",
                    "Failures show a retryable error state",
                ],
                priority: StoryPriority::High,
            },
            TemplateStory {
                title: "Support item creation",
                description: "Add a validated form that creates a new resource.",
                acceptance_criteria: &[
                    "Client-side validation mirrors the API's rules",
                    "A successful submit updates the list without a reload",
                ],
                priority: StoryPriority::Medium,
            },
            TemplateStory {
                title: "Make the app navigable",
                description: "Add routing between the list and detail views.",
                acceptance_criteria: &["Deep links open the matching detail view"],
                priority: StoryPriority::Low,
            },
        ],
        technical_requirements: &["Works in the two most recent browser majors"],
    },
    PrdTemplate {
        id: "cli-tool",
        name: "Command-line tool",
        category: "tooling",
        description: "A single-binary command-line tool.",
        stories: &[
            TemplateStory {
                title: "Implement the primary subcommand",
                description: "Implement the tool's main operation with helpful \
                              errors on bad input.",
                acceptance_criteria: &[
                    "The happy path completes with exit code zero",
                    "Bad input produces a non-zero exit and a usage hint",
                ],
                priority: StoryPriority::High,
            },
            TemplateStory {
                title: "Document the tool",
                description: "Add --help output and a usage section to the readme.",
                acceptance_criteria: &["--help documents every flag"],
                priority: StoryPriority::Low,
            },
        ],
        technical_requirements: &[],
    },
];

/// Looks a template up by catalog id.
#[must_use]
pub fn template_by_id(id: &str) -> Option<&'static PrdTemplate> {
    TEMPLATES.iter().find(|template| template.id == id)
}

/// Returns every template in a category.
#[must_use]
pub fn templates_by_category(category: &str) -> Vec<&'static PrdTemplate> {
    TEMPLATES
        .iter()
        .filter(|template| template.category == category)
        .collect()
}
