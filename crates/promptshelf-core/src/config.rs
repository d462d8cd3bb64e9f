//! Configuration loading and discovery.
//!
//! This module provides configuration file discovery by:
//! 1. Walking up from the current directory to find project config
//! 2. Loading user config from XDG config directory
//! 3. Merging with sensible defaults
//!
//! # Supported formats
//!
//! The following configuration file formats are supported:
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! # Config file locations (in order of precedence, highest first):
//! - `promptshelf.<ext>` in current directory or any parent
//! - `.promptshelf.<ext>` in current directory or any parent
//! - `~/.config/promptshelf/config.<ext>` (user config)
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`
//!
//! When multiple files exist in the same directory, all are merged via figment.
//! Later extensions override earlier: toml < yaml < yml < json.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use promptshelf_core::config::{Config, ConfigLoader};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let config = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Where the prompt library is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum StorageBackend {
    /// A JSON document on disk (default).
    #[default]
    File,
    /// Process memory; nothing survives exit.
    Memory,
}

impl StorageBackend {
    /// Returns the backend name as used in config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Library storage settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Which store to open.
    pub backend: StorageBackend,
    /// Library file for the `file` backend. Defaults to
    /// `<user data dir>/library.json`.
    pub path: Option<Utf8PathBuf>,
}

impl StorageConfig {
    /// File name used when no explicit path is configured.
    pub const DEFAULT_FILE_NAME: &'static str = "library.json";

    /// Path the `file` backend reads and writes.
    pub fn resolved_path(&self) -> ConfigResult<Utf8PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        user_data_dir()
            .map(|dir| dir.join(Self::DEFAULT_FILE_NAME))
            .ok_or(ConfigError::NoDataDir)
    }
}

/// The configuration for promptshelf.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON), then overridden by `PROMPTSHELF_*` environment variables.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Applies to files, stdin, and MCP tool arguments. Use
    /// `disable_input_limit` to remove the limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    #[serde(default)]
    pub disable_input_limit: bool,
    /// Library storage.
    pub storage: StorageConfig,
}

impl Config {
    /// Effective input limit, or `None` when limits are disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "promptshelf";

/// Application names to search for config files (in precedence order, lowest first).
const APP_NAMES: &[&str] = &[APP_NAME];

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from XDG directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load (for testing or programmatic use).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader will walk up from this directory looking for config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/promptshelf/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Set a boundary marker to stop directory traversal.
    ///
    /// When walking up directories, stop if we find a directory containing
    /// this file or directory name. Default is `.git`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Disable boundary marker (search all the way to filesystem root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Returns the merged config alongside metadata about which files
    /// were loaded — pass the [`ConfigSources`] to commands instead of
    /// having them re-discover config files.
    ///
    /// Precedence (highest to lowest):
    /// 1. Explicit files (in order added via `with_file`)
    /// 2. Project config (closest to search root)
    /// 3. User config (`~/.config/promptshelf/config.<ext>`)
    /// 4. Default values
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        // Start with user config (lowest precedence of file sources)
        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        // Add project configs (ordered low→high precedence)
        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        // Add explicit files
        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // Environment variables (highest precedence)
        // PROMPTSHELF_LOG_LEVEL=debug, PROMPTSHELF_STORAGE__PATH=/tmp/lib.json, etc.
        figment = figment.merge(Env::prefixed("PROMPTSHELF_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            storage = config.storage.backend.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Load configuration, returning an error if no config file is found.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && self.find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .map(|root| !self.find_project_configs(root).is_empty())
            .unwrap_or(false);
        let has_explicit = !self.explicit_files.is_empty();

        if !has_user && !has_project && !has_explicit {
            return Err(ConfigError::NotFound);
        }

        self.load()
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns all matching config files from the closest directory that has any
    /// match, ordered low-to-high precedence: dotfiles before regular files.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();

            // Search order (low→high precedence, figment merges last-wins):
            //   1. .promptshelf.{toml,yaml,yml,json}
            //   2. promptshelf.{toml,yaml,yml,json}
            for app_name in APP_NAMES {
                // Dotfiles first (lower precedence within same app name)
                for ext in CONFIG_EXTENSIONS {
                    let dotfile = dir.join(format!(".{app_name}.{ext}"));
                    if dotfile.is_file() {
                        found.push(dotfile);
                    }
                }
                // Regular files (higher precedence within same app name)
                for ext in CONFIG_EXTENSIONS {
                    let regular = dir.join(format!("{app_name}.{ext}"));
                    if regular.is_file() {
                        found.push(regular);
                    }
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Check for boundary marker AFTER checking config files,
            // so a config in the same directory as the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Find user config in XDG config directory.
    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
        let config_dir = proj_dirs.config_dir();

        // Try each supported extension
        for ext in CONFIG_EXTENSIONS {
            let config_path = config_dir.join(format!("config.{ext}"));
            if config_path.is_file() {
                return Utf8PathBuf::from_path_buf(config_path).ok();
            }
        }

        None
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("toml") => figment.merge(Toml::file_exact(path.as_str())),
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the project directories for XDG-compliant path resolution.
///
/// Returns `None` if the home directory cannot be determined.
fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Get the user config directory path.
///
/// Returns `~/.config/promptshelf/` on Linux, `~/Library/Application Support/promptshelf/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

/// Get the user cache directory path.
///
/// Returns `~/.cache/promptshelf/` on Linux, `~/Library/Caches/promptshelf/`
/// on macOS, and equivalent on other platforms.
pub fn user_cache_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.cache_dir().to_path_buf()).ok()
}

/// Get the user data directory path.
///
/// Returns `~/.local/share/promptshelf/` on Linux, `~/Library/Application Support/promptshelf/`
/// on macOS, and equivalent on other platforms.
pub fn user_data_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.data_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables via `set_var`/`remove_var`.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn load_file(contents: &str, name: &str) -> Config {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(name);
        fs::write(&config_path, contents).unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_loader_builds_with_defaults() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let loader = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker();

        let (config, sources) = loader.load().unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn test_single_file_overrides_default() {
        let config = load_file(
            r#"log_level = "debug"
log_dir = "/tmp/promptshelf"
"#,
            "config.toml",
        );

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.log_dir.as_ref().map(|dir| dir.as_str()),
            Some("/tmp/promptshelf")
        );
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();

        let base_config = tmp.path().join("base.toml");
        fs::write(&base_config, r#"log_level = "warn""#).unwrap();

        let override_config = tmp.path().join("override.toml");
        fs::write(&override_config, r#"log_level = "error""#).unwrap();

        let base_config = Utf8PathBuf::try_from(base_config).unwrap();
        let override_config = Utf8PathBuf::try_from(override_config).unwrap();

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&base_config)
            .with_file(&override_config)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn test_project_config_discovery() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("project");
        let sub_dir = project_dir.join("src").join("deep");
        fs::create_dir_all(&sub_dir).unwrap();

        fs::write(project_dir.join(".promptshelf.toml"), r#"log_level = "debug""#).unwrap();

        let sub_dir = Utf8PathBuf::try_from(sub_dir).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&sub_dir)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!sources.project_files.is_empty());
    }

    #[test]
    fn test_boundary_marker_stops_search() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();

        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();

        // Beyond the .git boundary
        fs::write(parent.join(".promptshelf.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(&work)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn test_explicit_file_overrides_project_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();

        fs::write(tmp.path().join(".promptshelf.toml"), r#"log_level = "warn""#).unwrap();
        let override_config = tmp.path().join("override.toml");
        fs::write(&override_config, r#"log_level = "error""#).unwrap();

        let tmp_path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let override_config = Utf8PathBuf::try_from(override_config).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&tmp_path)
            .with_file(&override_config)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert!(!sources.project_files.is_empty());
        assert_eq!(sources.explicit_files.len(), 1);
        assert_eq!(sources.primary_file(), Some(override_config.as_path()));
    }

    #[test]
    fn test_load_or_error_fails_when_no_config() {
        let result = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load_or_error();

        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_user_config_dir() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("promptshelf"));
        }
    }

    #[test]
    fn disable_input_limit_overrides_max_bytes() {
        let config = load_file(
            "max_input_bytes = 1024\ndisable_input_limit = true\n",
            "config.toml",
        );
        assert!(config.disable_input_limit);
        assert_eq!(config.max_input_bytes, Some(1024));
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn input_limit_defaults_to_five_mib() {
        let config = Config::default();
        assert_eq!(config.input_limit(), Some(5 * 1024 * 1024));

        let config = Config {
            max_input_bytes: Some(10),
            ..Config::default()
        };
        assert_eq!(config.input_limit(), Some(10));
    }

    #[test]
    fn storage_section_from_toml() {
        let config = load_file(
            "[storage]\nbackend = \"memory\"\npath = \"/tmp/shelf.json\"\n",
            "config.toml",
        );
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(
            config.storage.resolved_path().unwrap().as_str(),
            "/tmp/shelf.json"
        );
    }

    #[test]
    fn storage_section_from_yaml() {
        let yaml = "storage:\n  backend: file\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let yaml = "storage:\n  backend: sqlite\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn default_library_path_lives_in_data_dir() {
        if let Ok(path) = StorageConfig::default().resolved_path() {
            assert!(path.as_str().contains("promptshelf"));
            assert_eq!(path.file_name(), Some(StorageConfig::DEFAULT_FILE_NAME));
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_env_var_overrides_file_config() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "log_level = \"warn\"\n").unwrap();
        let config_path = Utf8PathBuf::try_from(config_path).unwrap();

        // SAFETY: Test environment; mutex serializes env access across tests.
        unsafe {
            std::env::set_var("PROMPTSHELF_LOG_LEVEL", "error");
            std::env::set_var("PROMPTSHELF_STORAGE__BACKEND", "memory");
        }

        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&config_path)
            .load()
            .unwrap();

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("PROMPTSHELF_LOG_LEVEL");
            std::env::remove_var("PROMPTSHELF_STORAGE__BACKEND");
        }

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn dotfile_before_regular_file() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".promptshelf.toml"), r#"log_level = "debug""#).unwrap();
        fs::write(tmp.path().join("promptshelf.toml"), r#"log_level = "error""#).unwrap();

        let tmp_path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&tmp_path)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.project_files.len(), 2);
    }

    #[test]
    fn only_closest_directory_contributes() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();

        fs::write(parent.join(".promptshelf.toml"), r#"log_level = "warn""#).unwrap();
        fs::write(child.join(".promptshelf.yaml"), "log_level: error\n").unwrap();

        let child_path = Utf8PathBuf::try_from(child).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&child_path)
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.project_files.len(), 1);
    }
}
