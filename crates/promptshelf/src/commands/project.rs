//! Project commands.

use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use promptshelf_core::LibraryStore;
use promptshelf_core::library::{Library, Project, ProjectEdit};

use super::{load_library, with_library};

/// Arguments for the `project` subcommand.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project action.
    #[command(subcommand)]
    pub action: ProjectAction,
}

/// Project actions.
#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// Create a project
    Add {
        /// Project name
        name: String,
        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Display color (hex)
        #[arg(long)]
        color: Option<String>,
    },
    /// List projects with prompt counts
    List,
    /// Rename a project
    Rename {
        /// Project id or name
        project: String,
        /// New name
        new_name: String,
    },
    /// Change a project's name, description, or color
    Edit {
        /// Project id or name
        project: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New display color (hex)
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete an empty project and its categories
    Rm {
        /// Project id or name
        project: String,
    },
}

#[derive(Serialize)]
struct ProjectRow<'a> {
    #[serde(flatten)]
    project: &'a Project,
    prompts: usize,
    categories: usize,
}

fn rows(library: &Library) -> Vec<ProjectRow<'_>> {
    library
        .projects
        .iter()
        .map(|project| ProjectRow {
            project,
            prompts: library
                .prompts
                .iter()
                .filter(|p| p.project_id == project.id)
                .count(),
            categories: library.categories_of(project.id).count(),
        })
        .collect()
}

/// Run a project action.
#[instrument(name = "cmd_project", skip_all)]
pub fn cmd_project(
    args: ProjectArgs,
    global_json: bool,
    store: &dyn LibraryStore,
) -> anyhow::Result<()> {
    debug!(action = ?args.action, "executing project command");

    match args.action {
        ProjectAction::Add {
            name,
            description,
            color,
        } => {
            let project = with_library(store, |lib| {
                Ok(lib
                    .add_project(&name, &description, color.as_deref())?
                    .clone())
            })?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&project)?);
            } else {
                println!("{} project {}", "Created".green(), project.name.bold());
            }
        }
        ProjectAction::List => {
            let library = load_library(store)?;
            let rows = rows(&library);
            if global_json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("{}", "No projects yet.".dimmed());
            } else {
                for row in rows {
                    println!(
                        "{}  {}  {} prompts, {} categories",
                        row.project.color.dimmed(),
                        row.project.name.bold(),
                        row.prompts,
                        row.categories,
                    );
                    if !row.project.description.is_empty() {
                        println!("    {}", row.project.description.dimmed());
                    }
                }
            }
        }
        ProjectAction::Rename { project, new_name } => {
            let renamed = with_library(store, |lib| {
                let id = lib.find_project(&project)?.id;
                lib.rename_project(id, &new_name)?;
                Ok(lib.find_project(&id.to_string())?.clone())
            })?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&renamed)?);
            } else {
                println!("{} {} to {}", "Renamed".green(), project, renamed.name.bold());
            }
        }
        ProjectAction::Edit {
            project,
            name,
            description,
            color,
        } => {
            let edit = ProjectEdit {
                name,
                description,
                color,
            };
            if edit.is_empty() {
                anyhow::bail!("nothing to change; pass --name, --description, or --color");
            }
            let updated = with_library(store, |lib| {
                let id = lib.find_project(&project)?.id;
                Ok(lib.update_project(id, edit)?.clone())
            })?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&updated)?);
            } else {
                println!("{} project {}", "Updated".green(), updated.name.bold());
            }
        }
        ProjectAction::Rm { project } => {
            let removed = with_library(store, |lib| {
                let id = lib.find_project(&project)?.id;
                Ok(lib.remove_project(id)?)
            })?;
            if global_json {
                println!("{}", serde_json::to_string_pretty(&removed)?);
            } else {
                println!("{} project {}", "Removed".green(), removed.name.bold());
            }
        }
    }
    Ok(())
}
