//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use promptshelf_core::{Library, LibraryStore};

pub mod analyze;
pub mod category;
pub mod info;
pub mod project;
pub mod prompt;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read all of stdin, refusing more than `max_bytes`.
pub fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    read_limited(std::io::stdin().lock(), "stdin", max_bytes)
}

fn read_limited(
    mut reader: impl Read,
    name: &str,
    max_bytes: Option<usize>,
) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    match max_bytes {
        Some(max) => {
            let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            reader
                .take(limit)
                .read_to_end(&mut bytes)
                .with_context(|| format!("failed to read {name}"))?;
            if bytes.len() > max {
                anyhow::bail!("input too large: {name} exceeds {max} bytes");
            }
        }
        None => {
            reader
                .read_to_end(&mut bytes)
                .with_context(|| format!("failed to read {name}"))?;
        }
    }
    String::from_utf8(bytes).with_context(|| format!("{name} is not valid UTF-8"))
}

/// Check text that arrived inline (argument or tool call) against the limit.
pub fn check_input_size(text: &str, name: &str, max_bytes: Option<usize>) -> anyhow::Result<()> {
    if let Some(max) = max_bytes
        && text.len() > max
    {
        anyhow::bail!(
            "input too large: {name} is {} bytes (limit: {max} bytes)",
            text.len()
        );
    }
    Ok(())
}

/// Load, mutate, and save the library in one step.
pub fn with_library<T>(
    store: &dyn LibraryStore,
    change: impl FnOnce(&mut Library) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let mut library = store
        .load()
        .with_context(|| format!("failed to load library from {}", store.describe()))?;
    let value = change(&mut library)?;
    store
        .save(&library)
        .with_context(|| format!("failed to save library to {}", store.describe()))?;
    Ok(value)
}

/// Load the library for read-only commands.
pub fn load_library(store: &dyn LibraryStore) -> anyhow::Result<Library> {
    store
        .load()
        .with_context(|| format!("failed to load library from {}", store.describe()))
}
