//! Library persistence.
//!
//! A [`LibraryStore`] loads and saves a whole [`Library`] document. The
//! backend is chosen once, from [`StorageConfig`], by [`open_store`].

use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::{StorageBackend, StorageConfig};
use crate::error::{ConfigError, LibraryError, LibraryResult};
use crate::library::Library;

/// Somewhere a library can be read from and written to.
pub trait LibraryStore: Send + Sync {
    /// Read the current library.
    fn load(&self) -> LibraryResult<Library>;

    /// Replace the stored library with `library`.
    fn save(&self, library: &Library) -> LibraryResult<()>;

    /// Short human-readable location, e.g. a file path.
    fn describe(&self) -> String;
}

/// A library stored as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: Utf8PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The library file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> LibraryError {
        LibraryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl LibraryStore for JsonFileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path))]
    fn load(&self) -> LibraryResult<Library> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("library file missing, starting empty");
                return Ok(Library::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let library: Library =
            serde_json::from_str(&text).map_err(|source| LibraryError::Parse {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(
            projects = library.projects.len(),
            prompts = library.prompts.len(),
            "library loaded"
        );
        Ok(library)
    }

    /// Writes a sibling `.tmp` file, then renames it over the library file.
    #[tracing::instrument(skip(self, library), fields(path = %self.path))]
    fn save(&self, library: &Library) -> LibraryResult<()> {
        let json = serde_json::to_string_pretty(library)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| LibraryError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(prompts = library.prompts.len(), "library saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.to_string()
    }
}

/// A library held in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    library: Mutex<Library>,
}

impl MemoryStore {
    /// An empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// An in-memory store seeded with `library`.
    pub fn with_library(library: Library) -> Self {
        Self {
            library: Mutex::new(library),
        }
    }
}

impl LibraryStore for MemoryStore {
    fn load(&self) -> LibraryResult<Library> {
        let guard = self.library.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, library: &Library) -> LibraryResult<()> {
        let mut guard = self.library.lock().unwrap_or_else(|e| e.into_inner());
        guard.clone_from(library);
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// Open the store named by `config`.
#[tracing::instrument(skip(config), fields(backend = %config.backend))]
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn LibraryStore>, ConfigError> {
    let store: Box<dyn LibraryStore> = match config.backend {
        StorageBackend::File => Box::new(JsonFileStore::new(config.resolved_path()?)),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };
    tracing::debug!(location = %store.describe(), "store opened");
    Ok(store)
}
