//! Markdown import and export for requirements documents.
//!
//! The exporter and parser are exact inverses for the fields the format
//! carries: title, description, user stories (id, title, description,
//! priority, acceptance criteria), technical requirements, and
//! dependencies. Tracking state (pass/attempt counters) is not part of the
//! format and resets on import.

use super::branch_name::generate_branch_name;
use crate::prd::domain::{
    MarkdownParseError, PrdDocument, PrdId, StoryPriority, UserStory,
};

/// Heading of the description section.
const OVERVIEW_HEADING: &str = "## Overview";
/// Heading of the story section.
const STORIES_HEADING: &str = "## User Stories";
/// Heading of the technical-requirements section.
const REQUIREMENTS_HEADING: &str = "## Technical Requirements";
/// Heading of the dependency section.
const DEPENDENCIES_HEADING: &str = "## Dependencies";
/// Label introducing a story's priority line.
const PRIORITY_LABEL: &str = "Priority:";
/// Label introducing a story's criteria list.
const CRITERIA_LABEL: &str = "Acceptance Criteria:";

/// Renders a document to its markdown form.
#[must_use]
pub fn to_markdown(document: &PrdDocument) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n", document.title));
    out.push_str(&format!("\n{OVERVIEW_HEADING}\n"));
    out.push_str(&format!("\n{}\n", document.description));
    out.push_str(&format!("\n{STORIES_HEADING}\n"));

    for story in &document.stories {
        out.push_str(&format!("\n### {}: {}\n", story.id, story.title));
        out.push_str(&format!("\n{}\n", story.description));
        out.push_str(&format!("\n{PRIORITY_LABEL} {}\n", story.priority));
        out.push_str(&format!("\n{CRITERIA_LABEL}\n\n"));
        for criterion in &story.acceptance_criteria {
            out.push_str(&format!("- {criterion}\n"));
        }
    }

    push_item_section(&mut out, REQUIREMENTS_HEADING, &document.technical_requirements);
    push_item_section(&mut out, DEPENDENCIES_HEADING, &document.dependencies);
    out
}

/// Appends one bullet-list section, omitted entirely when empty.
fn push_item_section(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{heading}\n\n"));
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
}

/// Which top-level section the parser is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Overview,
    Stories,
    Requirements,
    Dependencies,
    Other,
}

/// Parses a markdown document back into a fresh [`PrdDocument`].
///
/// The new document gets a fresh id and branch name; stories reset to
/// untracked state (`passes = false`, zero attempts, default ceiling).
/// Unrecognized sections are ignored.
///
/// # Errors
///
/// Returns [`MarkdownParseError::MissingTitle`] when no `# <title>` heading
/// is present, or [`MarkdownParseError::InvalidStoryHeading`] for a story
/// heading without an id prefix.
pub fn parse_markdown(input: &str) -> Result<PrdDocument, MarkdownParseError> {
    let mut title: Option<String> = None;
    let mut section = Section::Preamble;
    let mut description_lines: Vec<String> = Vec::new();
    let mut technical_requirements: Vec<String> = Vec::new();
    let mut dependencies: Vec<String> = Vec::new();
    let mut stories: Vec<UserStory> = Vec::new();
    let mut current_story: Option<StoryDraft> = None;

    for line in input.lines() {
        let trimmed = line.trim_end();

        if let Some(heading) = trimmed.strip_prefix("# ") {
            if title.is_none() {
                title = Some(heading.trim().to_owned());
            }
            continue;
        }
        if trimmed.starts_with("## ") {
            finish_story(&mut current_story, &mut stories);
            section = match trimmed {
                OVERVIEW_HEADING => Section::Overview,
                STORIES_HEADING => Section::Stories,
                REQUIREMENTS_HEADING => Section::Requirements,
                DEPENDENCIES_HEADING => Section::Dependencies,
                _ => Section::Other,
            };
            continue;
        }

        match section {
            Section::Overview => description_lines.push(trimmed.to_owned()),
            Section::Stories => {
                if let Some(heading) = trimmed.strip_prefix("### ") {
                    finish_story(&mut current_story, &mut stories);
                    current_story = Some(StoryDraft::from_heading(heading)?);
                } else if let Some(draft) = current_story.as_mut() {
                    draft.feed(trimmed);
                }
            }
            Section::Requirements => {
                if let Some(item) = trimmed.strip_prefix("- ") {
                    technical_requirements.push(item.trim().to_owned());
                }
            }
            Section::Dependencies => {
                if let Some(item) = trimmed.strip_prefix("- ") {
                    dependencies.push(item.trim().to_owned());
                }
            }
            Section::Preamble | Section::Other => {}
        }
    }
    finish_story(&mut current_story, &mut stories);

    let document_title = title.ok_or(MarkdownParseError::MissingTitle)?;
    let branch_name = generate_branch_name(&document_title);
    Ok(PrdDocument {
        id: PrdId::new(),
        title: document_title,
        description: join_paragraph(&description_lines),
        version: "1.0.0".to_owned(),
        branch_name,
        stories,
        technical_requirements,
        dependencies,
    })
}

/// Moves a finished story draft into the story list.
fn finish_story(draft: &mut Option<StoryDraft>, stories: &mut Vec<UserStory>) {
    if let Some(done) = draft.take() {
        stories.push(done.build());
    }
}

/// Joins collected lines into one paragraph block, trimming blank edges.
fn join_paragraph(lines: &[String]) -> String {
    let start = lines.iter().position(|line| !line.trim().is_empty());
    let end = lines.iter().rposition(|line| !line.trim().is_empty());
    match (start, end) {
        (Some(first), Some(last)) if first <= last => lines
            .iter()
            .skip(first)
            .take(last - first + 1)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// A story being accumulated line by line.
struct StoryDraft {
    id: String,
    title: String,
    description_lines: Vec<String>,
    priority: StoryPriority,
    criteria: Vec<String>,
    in_criteria: bool,
}

impl StoryDraft {
    /// Parses the `<id>: <title>` heading remainder.
    fn from_heading(heading: &str) -> Result<Self, MarkdownParseError> {
        let (raw_id, raw_title) = heading
            .split_once(':')
            .ok_or_else(|| MarkdownParseError::InvalidStoryHeading(heading.to_owned()))?;
        let story_id = raw_id.trim();
        if story_id.is_empty() {
            return Err(MarkdownParseError::InvalidStoryHeading(heading.to_owned()));
        }
        Ok(Self {
            id: story_id.to_owned(),
            title: raw_title.trim().to_owned(),
            description_lines: Vec::new(),
            priority: StoryPriority::default(),
            criteria: Vec::new(),
            in_criteria: false,
        })
    }

    /// Feeds one body line into the draft.
    fn feed(&mut self, line: &str) {
        if let Some(priority) = line.strip_prefix(PRIORITY_LABEL) {
            self.priority = StoryPriority::try_from(priority.trim()).unwrap_or_default();
            self.in_criteria = false;
            return;
        }
        if line.trim() == CRITERIA_LABEL {
            self.in_criteria = true;
            return;
        }
        if self.in_criteria {
            if let Some(item) = line.strip_prefix("- ") {
                self.criteria.push(item.trim().to_owned());
            }
            return;
        }
        self.description_lines.push(line.to_owned());
    }

    /// Builds the untracked story.
    fn build(self) -> UserStory {
        UserStory::new(
            self.id,
            self.title,
            join_paragraph(&self.description_lines),
            self.criteria,
        )
        .with_priority(self.priority)
    }
}
