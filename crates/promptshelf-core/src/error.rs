//! Error types for promptshelf-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// No data directory could be determined for the default library path.
    #[error("could not determine a data directory; set storage.path explicitly")]
    NoDataDir,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by library mutations and the stores that persist them.
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Reading or writing the library file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File that could not be accessed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The library file exists but is not a valid library document.
    #[error("invalid library file {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The library could not be serialized.
    #[error("failed to serialize library: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No project matches the given id or name.
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    /// No category matches the given id or name.
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    /// No prompt matches the given id or id prefix.
    #[error("prompt not found: {0}")]
    PromptNotFound(String),

    /// A project with this name already exists.
    #[error("a project named {0:?} already exists")]
    DuplicateProject(String),

    /// The project already has a category with this name.
    #[error("project {project:?} already has a category named {name:?}")]
    DuplicateCategory {
        /// Owning project name.
        project: String,
        /// Conflicting category name.
        name: String,
    },

    /// The category belongs to a different project than the prompt.
    #[error("category {category:?} does not belong to project {project:?}")]
    CategoryProjectMismatch {
        /// Category name.
        category: String,
        /// Project name the prompt was filed under.
        project: String,
    },

    /// The project still has prompts filed under it.
    #[error("project {name:?} still has {prompts} prompt(s); move or delete them first")]
    ProjectInUse {
        /// Project name.
        name: String,
        /// Number of prompts referencing the project.
        prompts: usize,
    },

    /// A required name or title was empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Result type alias using [`LibraryError`].
pub type LibraryResult<T> = Result<T, LibraryError>;
