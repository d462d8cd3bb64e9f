//! Library entities.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default display color for new projects.
pub const DEFAULT_PROJECT_COLOR: &str = "#3b82f6";

/// A named group of prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name, unique within a library (case-insensitive).
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Display color as a hex string.
    #[serde(default = "default_color")]
    pub color: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_PROJECT_COLOR.to_string()
}

/// A subdivision of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name, unique within its project.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Owning project.
    pub project_id: Uuid,
}

/// A stored prompt and its organizational metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Prompt {
    /// Stable identifier.
    pub id: Uuid,
    /// Short title shown in listings.
    pub title: String,
    /// The prompt text.
    pub content: String,
    /// Project the prompt is filed under.
    pub project_id: Uuid,
    /// Optional category within the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last edit.
    pub updated_at: DateTime<Utc>,
    /// Edit counter, starting at 1.
    pub version: u32,
    /// Pinned by the user.
    #[serde(default)]
    pub is_favorite: bool,
    /// Number of times the prompt was used.
    #[serde(default)]
    pub usage_count: u64,
}

impl Prompt {
    /// Returns `true` if any tag equals `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| names_match(t, tag))
    }
}

/// Fields for a prompt that does not exist yet.
#[derive(Debug, Clone, Default)]
pub struct NewPrompt {
    /// Title (must not be blank).
    pub title: String,
    /// Prompt text.
    pub content: String,
    /// Project to file under.
    pub project_id: Uuid,
    /// Optional category; must belong to `project_id`.
    pub category_id: Option<Uuid>,
    /// Tags.
    pub tags: Vec<String>,
    /// Start as a favorite.
    pub is_favorite: bool,
}

/// Changes to apply to an existing project. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct ProjectEdit {
    /// New name (must stay unique).
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New display color.
    pub color: Option<String>,
}

impl ProjectEdit {
    /// Returns `true` if the edit changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.color.is_none()
    }
}

/// Changes to apply to an existing category. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct CategoryEdit {
    /// New name (must stay unique within the project).
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl CategoryEdit {
    /// Returns `true` if the edit changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Changes to apply to an existing prompt. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct PromptEdit {
    /// New title.
    pub title: Option<String>,
    /// New content.
    pub content: Option<String>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
    /// Move to another project.
    pub project_id: Option<Uuid>,
    /// New category; `Some(None)` clears it.
    pub category_id: Option<Option<Uuid>>,
}

impl PromptEdit {
    /// Returns `true` if the edit changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.project_id.is_none()
            && self.category_id.is_none()
    }
}

/// Case-insensitive name comparison, with full Unicode case folding.
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Trim tags, drop blanks, and remove case-insensitive duplicates.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| names_match(t, tag)) {
            out.push(tag.to_string());
        }
    }
    out
}
