//! Prompt search and filtering.

use uuid::Uuid;

use super::model::Prompt;

/// Criteria for narrowing a prompt listing. All set criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFilter {
    /// Case-insensitive substring matched against title, content, and tags.
    pub search: Option<String>,
    /// Only prompts in this project.
    pub project_id: Option<Uuid>,
    /// Only prompts in this category.
    pub category_id: Option<Uuid>,
    /// Only favorites.
    pub favorites_only: bool,
}

impl PromptFilter {
    /// Filter on a search query. Blank queries match everything.
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..Self::default()
        }
    }

    /// Returns `true` if `prompt` satisfies every criterion.
    pub fn matches(&self, prompt: &Prompt) -> bool {
        self.matches_search(prompt)
            && self.project_id.is_none_or(|id| prompt.project_id == id)
            && self
                .category_id
                .is_none_or(|id| prompt.category_id == Some(id))
            && (!self.favorites_only || prompt.is_favorite)
    }

    fn matches_search(&self, prompt: &Prompt) -> bool {
        let Some(query) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        prompt.title.to_lowercase().contains(&query)
            || prompt.content.to_lowercase().contains(&query)
            || prompt
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
    }
}

/// Order prompts favorites first, then most recently updated.
pub fn sort_for_listing(prompts: &mut [&Prompt]) {
    prompts.sort_by(|a, b| {
        b.is_favorite
            .cmp(&a.is_favorite)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
            .then_with(|| a.title.cmp(&b.title))
    });
}
