//! Category commands.

use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use promptshelf_core::LibraryStore;
use promptshelf_core::library::CategoryEdit;

use super::{load_library, with_library};

/// Arguments for the `category` subcommand.
#[derive(Args, Debug)]
pub struct CategoryArgs {
    /// Category action.
    #[command(subcommand)]
    pub action: CategoryAction,
}

/// Category actions.
#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    /// Create a category in a project
    Add {
        /// Owning project id or name
        #[arg(short, long)]
        project: String,
        /// Category name
        name: String,
        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List categories, optionally for one project
    List {
        /// Project id or name
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Change a category's name or description
    Edit {
        /// Project id or name, to disambiguate category names
        #[arg(short, long)]
        project: Option<String>,
        /// Category id or name
        category: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a category; its prompts become uncategorized
    Rm {
        /// Project id or name, to disambiguate category names
        #[arg(short, long)]
        project: Option<String>,
        /// Category id or name
        category: String,
    },
}

/// Run a category action.
#[instrument(name = "cmd_category", skip_all)]
pub fn cmd_category(
    args: CategoryArgs,
    global_json: bool,
    store: &dyn LibraryStore,
) -> anyhow::Result<()> {
    debug!(action = ?args.action, "executing category command");

    match args.action {
        CategoryAction::Add {
            project,
            name,
            description,
        } => {
            let category = with_library(store, |lib| {
                let project_id = lib.find_project(&project)?.id;
                Ok(lib.add_category(project_id, &name, &description)?.clone())
            })?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&category)?);
            } else {
                println!(
                    "{} category {} in {}",
                    "Created".green(),
                    category.name.bold(),
                    project
                );
            }
        }
        CategoryAction::List { project } => {
            let library = load_library(store)?;
            let project_id = project
                .as_deref()
                .map(|key| library.find_project(key).map(|p| p.id))
                .transpose()?;
            let categories: Vec<_> = library
                .categories
                .iter()
                .filter(|c| project_id.is_none_or(|id| c.project_id == id))
                .collect();

            if global_json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else if categories.is_empty() {
                println!("{}", "No categories.".dimmed());
            } else {
                for category in categories {
                    let owner = library
                        .project(category.project_id)
                        .map_or("?", |p| p.name.as_str());
                    println!("{} / {}", owner.dimmed(), category.name.bold());
                }
            }
        }
        CategoryAction::Edit {
            project,
            category,
            name,
            description,
        } => {
            let edit = CategoryEdit { name, description };
            if edit.is_empty() {
                anyhow::bail!("nothing to change; pass --name or --description");
            }
            let updated = with_library(store, |lib| {
                let project_id = project
                    .as_deref()
                    .map(|key| lib.find_project(key).map(|p| p.id))
                    .transpose()?;
                let id = lib.find_category(project_id, &category)?.id;
                Ok(lib.update_category(id, edit)?.clone())
            })?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&updated)?);
            } else {
                println!("{} category {}", "Updated".green(), updated.name.bold());
            }
        }
        CategoryAction::Rm { project, category } => {
            let removed = with_library(store, |lib| {
                let project_id = project
                    .as_deref()
                    .map(|key| lib.find_project(key).map(|p| p.id))
                    .transpose()?;
                let id = lib.find_category(project_id, &category)?.id;
                Ok(lib.remove_category(id)?)
            })?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&removed)?);
            } else {
                println!("{} category {}", "Removed".green(), removed.name.bold());
            }
        }
    }
    Ok(())
}
