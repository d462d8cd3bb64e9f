//! Core library for promptshelf.
//!
//! This crate provides the prompt-quality analyzer, the prompt library
//! model, and its persistence, used by the `promptshelf` CLI and MCP server.
//!
//! # Modules
//!
//! - [`analyzer`] - Heuristic prompt analysis and suggestions
//! - [`display`] - Icon and style lookups for suggestions
//! - [`library`] - Projects, categories, and prompts
//! - [`store`] - Library persistence backends
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! let result = promptshelf_core::analyze("Summarize this article in three bullet points.");
//! assert!(result.word_count > 0);
//! assert!(result.suggestions.len() <= promptshelf_core::analyzer::MAX_SUGGESTIONS);
//! ```
#![deny(unsafe_code)]

pub mod analyzer;
pub mod config;
pub mod display;
pub mod error;
pub mod library;
pub mod readability;
pub mod store;
pub mod text;
pub mod word_lists;

pub use analyzer::{AnalysisResult, Priority, Suggestion, SuggestionCategory, analyze};
pub use config::{Config, ConfigLoader, LogLevel, StorageBackend, StorageConfig};
pub use error::{ConfigError, ConfigResult, LibraryError, LibraryResult};
pub use library::{Library, PromptFilter};
pub use store::{JsonFileStore, LibraryStore, MemoryStore, open_store};
pub use uuid::Uuid;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
