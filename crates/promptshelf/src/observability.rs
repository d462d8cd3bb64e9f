//! Logging setup: human-readable stderr output plus optional JSONL files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Explicit log file path.
const LOG_PATH_ENV: &str = "PROMPTSHELF_LOG_PATH";
/// Directory for daily-rotated log files.
const LOG_DIR_ENV: &str = "PROMPTSHELF_LOG_DIR";
/// File name prefix for rotated logs.
const LOG_FILE_PREFIX: &str = "promptshelf";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Single log file, never rotated.
    pub log_file: Option<PathBuf>,
    /// Directory of daily-rotated `promptshelf.<date>.jsonl` files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `PROMPTSHELF_LOG_PATH` / `PROMPTSHELF_LOG_DIR`, falling back to
    /// the configured `log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let non_empty = |p: &PathBuf| !p.as_os_str().is_empty();
        Self {
            log_file: env_path.filter(non_empty),
            log_dir: env_dir.filter(non_empty).or(config_dir),
        }
    }
}

/// Build the filter: `RUST_LOG` wins, then `-q`/`-v`, then the configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_for(quiet, verbose, default_level))
}

fn level_for(quiet: bool, verbose: u8, default_level: &str) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => default_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

fn file_appender(cfg: &ObservabilityConfig) -> anyhow::Result<Option<RollingFileAppender>> {
    let (dir, prefix, rotation) = if let Some(file) = &cfg.log_file {
        let dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .context("log file path has no usable file name")?
            .to_string();
        (dir, name, Rotation::NEVER)
    } else if let Some(dir) = &cfg.log_dir {
        (dir.clone(), LOG_FILE_PREFIX.to_string(), Rotation::DAILY)
    } else {
        return Ok(None);
    };

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let mut builder = RollingFileAppender::builder()
        .rotation(rotation.clone())
        .filename_prefix(prefix);
    if rotation == Rotation::DAILY {
        builder = builder.filename_suffix("jsonl");
    }
    let appender = builder
        .build(&dir)
        .with_context(|| format!("failed to open log file in {}", dir.display()))?;
    Ok(Some(appender))
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes buffered file output.
pub fn init_observability(
    cfg: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match file_appender(cfg)? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_path_and_dir_beat_config() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/a.log")),
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(cfg.log_file.as_deref(), Some(Path::new("/tmp/a.log")));
        assert_eq!(cfg.log_dir.as_deref(), Some(Path::new("/tmp/env")));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::new()),
            Some(PathBuf::new()),
            Some(PathBuf::from("/tmp/config")),
        );
        assert!(cfg.log_file.is_none());
        assert_eq!(cfg.log_dir.as_deref(), Some(Path::new("/tmp/config")));
    }

    #[test]
    fn no_sources_means_stderr_only() {
        let cfg = ObservabilityConfig::resolve(None, None, None);
        assert_eq!(cfg, ObservabilityConfig::default());
        assert!(file_appender(&cfg).unwrap().is_none());
    }

    #[test]
    fn flags_pick_level() {
        assert_eq!(level_for(true, 3, "info"), "error");
        assert_eq!(level_for(false, 0, "warn"), "warn");
        assert_eq!(level_for(false, 1, "info"), "debug");
        assert_eq!(level_for(false, 2, "info"), "trace");
    }

    #[test]
    fn log_dir_is_created() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cfg = ObservabilityConfig {
            log_file: None,
            log_dir: Some(tmp.path().join("logs")),
        };
        assert!(file_appender(&cfg).unwrap().is_some());
        assert!(tmp.path().join("logs").is_dir());
    }
}
