//! The prompt library: projects, categories, and prompts.
//!
//! Prompts reference their project and category by id. Names are only used
//! to resolve what a user typed ([`Library::find_project`],
//! [`Library::find_category`]), so renaming a project never orphans the
//! prompts filed under it.
//!
//! Every mutation validates references before touching anything and returns
//! a [`LibraryResult`]. Persistence lives in [`crate::store`].

pub mod filter;
pub mod model;

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use filter::{PromptFilter, sort_for_listing};
pub use model::{
    Category, CategoryEdit, DEFAULT_PROJECT_COLOR, NewPrompt, Project, ProjectEdit, Prompt,
    PromptEdit, names_match, normalize_tags,
};

use crate::error::{LibraryError, LibraryResult};

/// All projects, categories, and prompts of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Library {
    /// Projects, in creation order.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Categories, in creation order.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Prompts, in creation order.
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

fn required(value: &str, field: &'static str) -> LibraryResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LibraryError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the library holds nothing.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.categories.is_empty() && self.prompts.is_empty()
    }

    // -- Projects -----------------------------------------------------------

    /// Look up a project by id.
    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Resolve a project from an id string or a case-insensitive name.
    pub fn find_project(&self, key: &str) -> LibraryResult<&Project> {
        let key = key.trim();
        let by_id = Uuid::parse_str(key).ok().and_then(|id| self.project(id));
        by_id
            .or_else(|| {
                self.projects
                    .iter()
                    .find(|p| names_match(&p.name, key))
            })
            .ok_or_else(|| LibraryError::ProjectNotFound(key.to_string()))
    }

    /// Add a project. Names must be non-blank and unique.
    #[tracing::instrument(skip(self, description))]
    pub fn add_project(
        &mut self,
        name: &str,
        description: &str,
        color: Option<&str>,
    ) -> LibraryResult<&Project> {
        let name = required(name, "project name")?;
        self.ensure_project_name_free(&name, None)?;

        self.projects.push(Project {
            id: Uuid::new_v4(),
            name,
            description: description.trim().to_string(),
            color: color.map_or_else(|| DEFAULT_PROJECT_COLOR.to_string(), str::to_string),
            created_at: Utc::now(),
        });
        tracing::debug!(projects = self.projects.len(), "project added");
        Ok(&self.projects[self.projects.len() - 1])
    }

    /// Rename a project. Prompts keep their association.
    pub fn rename_project(&mut self, id: Uuid, new_name: &str) -> LibraryResult<()> {
        let edit = ProjectEdit {
            name: Some(new_name.to_string()),
            ..ProjectEdit::default()
        };
        self.update_project(id, edit).map(|_| ())
    }

    /// Apply `edit` to a project. Names must stay non-blank and unique.
    #[tracing::instrument(skip(self, edit))]
    pub fn update_project(&mut self, id: Uuid, edit: ProjectEdit) -> LibraryResult<&Project> {
        let name = edit
            .name
            .as_deref()
            .map(|n| required(n, "project name"))
            .transpose()?;
        if let Some(name) = &name {
            self.ensure_project_name_free(name, Some(id))?;
        }
        let color = edit
            .color
            .as_deref()
            .map(|c| required(c, "project color"))
            .transpose()?;

        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LibraryError::ProjectNotFound(id.to_string()))?;
        if let Some(name) = name {
            project.name = name;
        }
        if let Some(description) = edit.description {
            project.description = description.trim().to_string();
        }
        if let Some(color) = color {
            project.color = color;
        }
        Ok(project)
    }

    /// Remove a project and its categories.
    ///
    /// Fails with [`LibraryError::ProjectInUse`] while prompts are filed
    /// under it.
    #[tracing::instrument(skip(self))]
    pub fn remove_project(&mut self, id: Uuid) -> LibraryResult<Project> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LibraryError::ProjectNotFound(id.to_string()))?;

        let prompts = self.prompts.iter().filter(|p| p.project_id == id).count();
        if prompts > 0 {
            return Err(LibraryError::ProjectInUse {
                name: self.projects[index].name.clone(),
                prompts,
            });
        }

        self.categories.retain(|c| c.project_id != id);
        Ok(self.projects.remove(index))
    }

    fn ensure_project_name_free(&self, name: &str, except: Option<Uuid>) -> LibraryResult<()> {
        let taken = self
            .projects
            .iter()
            .any(|p| Some(p.id) != except && names_match(&p.name, name));
        if taken {
            return Err(LibraryError::DuplicateProject(name.to_string()));
        }
        Ok(())
    }

    // -- Categories ---------------------------------------------------------

    /// Look up a category by id.
    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Categories belonging to `project_id`.
    pub fn categories_of(&self, project_id: Uuid) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |c| c.project_id == project_id)
    }

    /// Resolve a category from an id string or a case-insensitive name.
    ///
    /// Names are only unique per project, so name lookups without a
    /// `project_id` fail when more than one project has a match.
    pub fn find_category(&self, project_id: Option<Uuid>, key: &str) -> LibraryResult<&Category> {
        let key = key.trim();
        if let Some(category) = Uuid::parse_str(key).ok().and_then(|id| self.category(id)) {
            return Ok(category);
        }

        let mut matches = self.categories.iter().filter(|c| {
            project_id.is_none_or(|id| c.project_id == id) && names_match(&c.name, key)
        });
        match (matches.next(), matches.next()) {
            (Some(category), None) => Ok(category),
            _ => Err(LibraryError::CategoryNotFound(key.to_string())),
        }
    }

    /// Add a category to an existing project.
    #[tracing::instrument(skip(self, description))]
    pub fn add_category(
        &mut self,
        project_id: Uuid,
        name: &str,
        description: &str,
    ) -> LibraryResult<&Category> {
        let name = required(name, "category name")?;
        let project = self
            .project(project_id)
            .ok_or_else(|| LibraryError::ProjectNotFound(project_id.to_string()))?;

        let project_name = project.name.clone();
        self.ensure_category_name_free(project_id, &project_name, &name, None)?;

        self.categories.push(Category {
            id: Uuid::new_v4(),
            name,
            description: description.trim().to_string(),
            project_id,
        });
        Ok(&self.categories[self.categories.len() - 1])
    }

    /// Apply `edit` to a category. Names must stay unique within the project.
    #[tracing::instrument(skip(self, edit))]
    pub fn update_category(&mut self, id: Uuid, edit: CategoryEdit) -> LibraryResult<&Category> {
        let current = self
            .category(id)
            .ok_or_else(|| LibraryError::CategoryNotFound(id.to_string()))?;
        let project_id = current.project_id;
        let name = edit
            .name
            .as_deref()
            .map(|n| required(n, "category name"))
            .transpose()?;
        if let Some(name) = &name {
            let project_name = self
                .project(project_id)
                .map_or_else(|| project_id.to_string(), |p| p.name.clone());
            self.ensure_category_name_free(project_id, &project_name, name, Some(id))?;
        }

        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| LibraryError::CategoryNotFound(id.to_string()))?;
        if let Some(name) = name {
            category.name = name;
        }
        if let Some(description) = edit.description {
            category.description = description.trim().to_string();
        }
        Ok(category)
    }

    fn ensure_category_name_free(
        &self,
        project_id: Uuid,
        project_name: &str,
        name: &str,
        except: Option<Uuid>,
    ) -> LibraryResult<()> {
        let taken = self
            .categories_of(project_id)
            .any(|c| Some(c.id) != except && names_match(&c.name, name));
        if taken {
            return Err(LibraryError::DuplicateCategory {
                project: project_name.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Remove a category, clearing it from every prompt that used it.
    #[tracing::instrument(skip(self))]
    pub fn remove_category(&mut self, id: Uuid) -> LibraryResult<Category> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LibraryError::CategoryNotFound(id.to_string()))?;

        let mut cleared = 0usize;
        for prompt in self.prompts.iter_mut().filter(|p| p.category_id == Some(id)) {
            prompt.category_id = None;
            cleared += 1;
        }
        tracing::debug!(cleared, "category removed from prompts");
        Ok(self.categories.remove(index))
    }

    // -- Prompts ------------------------------------------------------------

    /// Look up a prompt by id.
    pub fn prompt(&self, id: Uuid) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Resolve a prompt from a full id or an unambiguous id prefix.
    pub fn find_prompt(&self, key: &str) -> LibraryResult<&Prompt> {
        let key = key.trim().to_ascii_lowercase();
        if let Ok(id) = Uuid::parse_str(&key) {
            return self
                .prompt(id)
                .ok_or_else(|| LibraryError::PromptNotFound(key.clone()));
        }

        let mut matches = self
            .prompts
            .iter()
            .filter(|p| !key.is_empty() && p.id.to_string().starts_with(&key));
        match (matches.next(), matches.next()) {
            (Some(prompt), None) => Ok(prompt),
            _ => Err(LibraryError::PromptNotFound(key)),
        }
    }

    fn prompt_mut(&mut self, id: Uuid) -> LibraryResult<&mut Prompt> {
        self.prompts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LibraryError::PromptNotFound(id.to_string()))
    }

    /// Check that `category_id` (if any) belongs to `project_id`.
    fn check_placement(&self, project_id: Uuid, category_id: Option<Uuid>) -> LibraryResult<()> {
        let project = self
            .project(project_id)
            .ok_or_else(|| LibraryError::ProjectNotFound(project_id.to_string()))?;
        if let Some(category_id) = category_id {
            let category = self
                .category(category_id)
                .ok_or_else(|| LibraryError::CategoryNotFound(category_id.to_string()))?;
            if category.project_id != project_id {
                return Err(LibraryError::CategoryProjectMismatch {
                    category: category.name.clone(),
                    project: project.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Add a prompt at version 1 with no usage.
    #[tracing::instrument(skip(self, new), fields(project_id = %new.project_id))]
    pub fn add_prompt(&mut self, new: NewPrompt) -> LibraryResult<&Prompt> {
        let title = required(&new.title, "prompt title")?;
        self.check_placement(new.project_id, new.category_id)?;

        let now = Utc::now();
        self.prompts.push(Prompt {
            id: Uuid::new_v4(),
            title,
            content: new.content,
            project_id: new.project_id,
            category_id: new.category_id,
            tags: normalize_tags(new.tags),
            created_at: now,
            updated_at: now,
            version: 1,
            is_favorite: new.is_favorite,
            usage_count: 0,
        });
        Ok(&self.prompts[self.prompts.len() - 1])
    }

    /// Apply `edit`, bump the version, and stamp `updated_at`.
    #[tracing::instrument(skip(self, edit))]
    pub fn update_prompt(&mut self, id: Uuid, edit: PromptEdit) -> LibraryResult<&Prompt> {
        let current = self
            .prompt(id)
            .ok_or_else(|| LibraryError::PromptNotFound(id.to_string()))?;
        let project_id = edit.project_id.unwrap_or(current.project_id);
        let category_id = match edit.category_id {
            Some(category_id) => category_id,
            // Moving projects drops a category that belonged to the old one.
            None if project_id != current.project_id => None,
            None => current.category_id,
        };
        let title = edit
            .title
            .as_deref()
            .map(|t| required(t, "prompt title"))
            .transpose()?;
        self.check_placement(project_id, category_id)?;

        let prompt = self.prompt_mut(id)?;
        if let Some(title) = title {
            prompt.title = title;
        }
        if let Some(content) = edit.content {
            prompt.content = content;
        }
        if let Some(tags) = edit.tags {
            prompt.tags = normalize_tags(tags);
        }
        prompt.project_id = project_id;
        prompt.category_id = category_id;
        prompt.version = prompt.version.saturating_add(1);
        prompt.updated_at = Utc::now();

        tracing::debug!(version = prompt.version, "prompt updated");
        Ok(prompt)
    }

    /// Flip the favorite flag and return the new value.
    pub fn toggle_favorite(&mut self, id: Uuid) -> LibraryResult<bool> {
        let prompt = self.prompt_mut(id)?;
        prompt.is_favorite = !prompt.is_favorite;
        Ok(prompt.is_favorite)
    }

    /// Count one use of the prompt and return the new total.
    pub fn record_use(&mut self, id: Uuid) -> LibraryResult<u64> {
        let prompt = self.prompt_mut(id)?;
        prompt.usage_count = prompt.usage_count.saturating_add(1);
        Ok(prompt.usage_count)
    }

    /// Remove a prompt.
    #[tracing::instrument(skip(self))]
    pub fn remove_prompt(&mut self, id: Uuid) -> LibraryResult<Prompt> {
        let index = self
            .prompts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LibraryError::PromptNotFound(id.to_string()))?;
        Ok(self.prompts.remove(index))
    }

    /// Prompts matching `filter`, favorites first, then most recently updated.
    pub fn filter(&self, filter: &PromptFilter) -> Vec<&Prompt> {
        let mut found: Vec<&Prompt> = self.prompts.iter().filter(|p| filter.matches(p)).collect();
        sort_for_listing(&mut found);
        found
    }
}
