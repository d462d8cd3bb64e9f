//! Prompt commands.

use camino::Utf8PathBuf;
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use promptshelf_core::analyzer;
use promptshelf_core::library::{Library, NewPrompt, Prompt, PromptEdit, PromptFilter};
use promptshelf_core::{LibraryStore, Uuid};

use super::{check_input_size, load_library, read_input_file, read_stdin, with_library};

/// Arguments for the `prompt` subcommand.
#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Prompt action.
    #[command(subcommand)]
    pub action: PromptAction,
}

/// Where a prompt's text comes from.
#[derive(Args, Debug, Default)]
pub struct ContentSource {
    /// Prompt text
    #[arg(long, conflicts_with = "file")]
    pub content: Option<String>,
    /// Read prompt text from a file
    #[arg(long)]
    pub file: Option<Utf8PathBuf>,
}

impl ContentSource {
    fn read(self, max_input: Option<usize>) -> anyhow::Result<Option<String>> {
        match (self.content, self.file) {
            (Some(text), _) => {
                check_input_size(&text, "--content", max_input)?;
                Ok(Some(text))
            }
            (None, Some(path)) => read_input_file(&path, max_input).map(Some),
            (None, None) => Ok(None),
        }
    }
}

/// Prompt actions.
#[derive(Subcommand, Debug)]
pub enum PromptAction {
    /// Save a new prompt (text from --content, --file, or stdin)
    Add {
        /// Title shown in listings
        #[arg(short, long)]
        title: String,
        /// Project id or name
        #[arg(short, long)]
        project: String,
        /// Category id or name within the project
        #[arg(long)]
        category: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Mark as favorite
        #[arg(long)]
        favorite: bool,
        #[command(flatten)]
        source: ContentSource,
    },
    /// List prompts, favorites first
    List {
        /// Case-insensitive search over title, content, and tags
        #[arg(short, long)]
        search: Option<String>,
        /// Only this project
        #[arg(short, long)]
        project: Option<String>,
        /// Only this category
        #[arg(long)]
        category: Option<String>,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Show one prompt
    Show {
        /// Prompt id or id prefix
        id: String,
        /// Also run the analyzer on it
        #[arg(long)]
        analyze: bool,
    },
    /// Edit a prompt (bumps its version)
    Edit {
        /// Prompt id or id prefix
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// Move to another project
        #[arg(short, long)]
        project: Option<String>,
        /// New category
        #[arg(long, conflicts_with = "no_category")]
        category: Option<String>,
        /// Clear the category
        #[arg(long)]
        no_category: bool,
        /// Replace all tags (repeatable)
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
        #[command(flatten)]
        source: ContentSource,
    },
    /// Delete a prompt
    Rm {
        /// Prompt id or id prefix
        id: String,
    },
    /// Toggle favorite
    Fav {
        /// Prompt id or id prefix
        id: String,
    },
    /// Print a prompt's text and count the use
    Use {
        /// Prompt id or id prefix
        id: String,
    },
}

fn resolve_category(lib: &Library, project_id: Uuid, key: &str) -> anyhow::Result<Uuid> {
    Ok(lib.find_category(Some(project_id), key)?.id)
}

fn print_prompt_line(lib: &Library, prompt: &Prompt) {
    let star = if prompt.is_favorite { "*" } else { " " };
    let project = lib
        .project(prompt.project_id)
        .map_or("?", |p| p.name.as_str());
    let short_id: String = prompt.id.to_string().chars().take(8).collect();
    let mut line = format!(
        "{} {} {}  {}",
        star.yellow(),
        short_id.dimmed(),
        prompt.title.bold(),
        project.cyan()
    );
    if let Some(category) = prompt.category_id.and_then(|id| lib.category(id)) {
        line.push_str(&format!(" / {}", category.name.cyan()));
    }
    if !prompt.tags.is_empty() {
        line.push_str(&format!("  [{}]", prompt.tags.join(", ")));
    }
    println!("{line}");
}

/// Run a prompt action.
#[instrument(name = "cmd_prompt", skip_all)]
pub fn cmd_prompt(
    args: PromptArgs,
    global_json: bool,
    store: &dyn LibraryStore,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(action = ?args.action, "executing prompt command");

    match args.action {
        PromptAction::Add {
            title,
            project,
            category,
            tags,
            favorite,
            source,
        } => {
            let content = match source.read(max_input)? {
                Some(text) => text,
                None => read_stdin(max_input)?,
            };
            let prompt = with_library(store, |lib| {
                let project_id = lib.find_project(&project)?.id;
                let category_id = category
                    .as_deref()
                    .map(|key| resolve_category(lib, project_id, key))
                    .transpose()?;
                let new = NewPrompt {
                    title,
                    content,
                    project_id,
                    category_id,
                    tags,
                    is_favorite: favorite,
                };
                Ok(lib.add_prompt(new)?.clone())
            })?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&prompt)?);
            } else {
                println!("{} prompt {} ({})", "Saved".green(), prompt.title.bold(), prompt.id);
            }
        }
        PromptAction::List {
            search,
            project,
            category,
            favorites,
        } => {
            let lib = load_library(store)?;
            let project_id = project
                .as_deref()
                .map(|key| lib.find_project(key).map(|p| p.id))
                .transpose()?;
            let category_id = category
                .as_deref()
                .map(|key| lib.find_category(project_id, key).map(|c| c.id))
                .transpose()?;
            let filter = PromptFilter {
                search,
                project_id,
                category_id,
                favorites_only: favorites,
            };
            let found = lib.filter(&filter);
            debug!(matched = found.len(), "prompts filtered");

            if global_json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else if found.is_empty() {
                println!("{}", "No matching prompts.".dimmed());
            } else {
                for prompt in found {
                    print_prompt_line(&lib, prompt);
                }
            }
        }
        PromptAction::Show { id, analyze } => {
            let lib = load_library(store)?;
            let prompt = lib.find_prompt(&id)?;
            let analysis = analyze.then(|| analyzer::analyze(&prompt.content));

            if global_json {
                let value = serde_json::json!({
                    "prompt": prompt,
                    "analysis": analysis,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print_prompt_line(&lib, prompt);
                println!(
                    "{} v{}, used {} times, updated {}",
                    "    ".dimmed(),
                    prompt.version,
                    prompt.usage_count,
                    prompt.updated_at.format("%Y-%m-%d %H:%M"),
                );
                println!();
                println!("{}", prompt.content);
                if let Some(result) = analysis {
                    println!();
                    super::analyze::print_result(&result);
                }
            }
        }
        PromptAction::Edit {
            id,
            title,
            project,
            category,
            no_category,
            tags,
            source,
        } => {
            let content = source.read(max_input)?;
            let prompt = with_library(store, |lib| {
                let current = lib.find_prompt(&id)?;
                let prompt_id = current.id;
                let project_id = project
                    .as_deref()
                    .map(|key| lib.find_project(key).map(|p| p.id))
                    .transpose()?;
                let target_project = project_id.unwrap_or(current.project_id);
                let category_id = if no_category {
                    Some(None)
                } else {
                    category
                        .as_deref()
                        .map(|key| resolve_category(lib, target_project, key).map(Some))
                        .transpose()?
                };
                let edit = PromptEdit {
                    title,
                    content,
                    tags,
                    project_id,
                    category_id,
                };
                if edit.is_empty() {
                    anyhow::bail!("nothing to change; pass at least one field to edit");
                }
                Ok(lib.update_prompt(prompt_id, edit)?.clone())
            })?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&prompt)?);
            } else {
                println!(
                    "{} {} (now v{})",
                    "Updated".green(),
                    prompt.title.bold(),
                    prompt.version
                );
            }
        }
        PromptAction::Rm { id } => {
            let removed = with_library(store, |lib| {
                let prompt_id = lib.find_prompt(&id)?.id;
                Ok(lib.remove_prompt(prompt_id)?)
            })?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&removed)?);
            } else {
                println!("{} prompt {}", "Removed".green(), removed.title.bold());
            }
        }
        PromptAction::Fav { id } => {
            let (title, favorite) = with_library(store, |lib| {
                let prompt = lib.find_prompt(&id)?;
                let (prompt_id, title) = (prompt.id, prompt.title.clone());
                Ok((title, lib.toggle_favorite(prompt_id)?))
            })?;
            if global_json {
                println!("{}", serde_json::json!({ "title": title, "is_favorite": favorite }));
            } else if favorite {
                println!("{} {}", "Favorited".yellow(), title.bold());
            } else {
                println!("{} {}", "Unfavorited".dimmed(), title.bold());
            }
        }
        PromptAction::Use { id } => {
            let (content, uses) = with_library(store, |lib| {
                let prompt = lib.find_prompt(&id)?;
                let (prompt_id, content) = (prompt.id, prompt.content.clone());
                Ok((content, lib.record_use(prompt_id)?))
            })?;
            debug!(uses, "prompt used");
            if global_json {
                println!("{}", serde_json::json!({ "content": content, "usage_count": uses }));
            } else {
                println!("{content}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptshelf_core::MemoryStore;

    fn store_with_project() -> MemoryStore {
        let mut lib = Library::new();
        let work = lib.add_project("Work", "", None).unwrap().id;
        lib.add_category(work, "Email", "").unwrap();
        MemoryStore::with_library(lib)
    }

    fn run(store: &MemoryStore, action: PromptAction) -> anyhow::Result<()> {
        cmd_prompt(PromptArgs { action }, true, store, None)
    }

    fn add(store: &MemoryStore, title: &str) -> Uuid {
        run(
            store,
            PromptAction::Add {
                title: title.into(),
                project: "work".into(),
                category: Some("email".into()),
                tags: vec!["draft".into()],
                favorite: false,
                source: ContentSource {
                    content: Some(format!("Write a {title}.")),
                    file: None,
                },
            },
        )
        .unwrap();
        store
            .load()
            .unwrap()
            .prompts
            .iter()
            .find(|p| p.title == title)
            .unwrap()
            .id
    }

    #[test]
    fn add_and_list() {
        let store = store_with_project();
        add(&store, "follow-up");

        let lib = store.load().unwrap();
        assert_eq!(lib.prompts.len(), 1);
        assert!(lib.prompts[0].category_id.is_some());

        run(
            &store,
            PromptAction::List {
                search: Some("FOLLOW".into()),
                project: Some("Work".into()),
                category: None,
                favorites: false,
            },
        )
        .unwrap();
    }

    #[test]
    fn edit_bumps_version_and_clears_category() {
        let store = store_with_project();
        let id = add(&store, "memo");

        run(
            &store,
            PromptAction::Edit {
                id: id.to_string(),
                title: None,
                project: None,
                category: None,
                no_category: true,
                tags: None,
                source: ContentSource::default(),
            },
        )
        .unwrap();

        let prompt = store.load().unwrap().prompt(id).cloned().unwrap();
        assert_eq!(prompt.version, 2);
        assert_eq!(prompt.category_id, None);
    }

    #[test]
    fn empty_edit_is_rejected() {
        let store = store_with_project();
        let id = add(&store, "memo");
        let result = run(
            &store,
            PromptAction::Edit {
                id: id.to_string(),
                title: None,
                project: None,
                category: None,
                no_category: false,
                tags: None,
                source: ContentSource::default(),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn fav_use_and_remove() {
        let store = store_with_project();
        let id = add(&store, "summary");
        let key = id.to_string()[..8].to_string();

        run(&store, PromptAction::Fav { id: key.clone() }).unwrap();
        run(&store, PromptAction::Use { id: key.clone() }).unwrap();
        run(&store, PromptAction::Show { id: key.clone(), analyze: true }).unwrap();

        let prompt = store.load().unwrap().prompt(id).cloned().unwrap();
        assert!(prompt.is_favorite);
        assert_eq!(prompt.usage_count, 1);

        run(&store, PromptAction::Rm { id: key }).unwrap();
        assert!(store.load().unwrap().prompts.is_empty());
    }

    #[test]
    fn unknown_prompt_fails() {
        let store = store_with_project();
        assert!(run(&store, PromptAction::Fav { id: "deadbeef".into() }).is_err());
    }
}
