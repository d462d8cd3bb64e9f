//! promptshelf CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use promptshelf::{Cli, Commands, commands};
use promptshelf_core::config::ConfigLoader;
use promptshelf_core::open_store;
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let (config, config_sources) = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        "CLI initialized"
    );

    let max_input = config.input_limit();

    let open_library = || open_store(&config.storage).context("failed to open prompt library");

    // Execute command
    let result = match command {
        Commands::Analyze(args) => commands::analyze::cmd_analyze(args, cli.json, max_input),
        Commands::Prompt(args) => open_library().and_then(|store| {
            commands::prompt::cmd_prompt(args, cli.json, store.as_ref(), max_input)
        }),
        Commands::Project(args) => open_library()
            .and_then(|store| commands::project::cmd_project(args, cli.json, store.as_ref())),
        Commands::Category(args) => open_library()
            .and_then(|store| commands::category::cmd_category(args, cli.json, store.as_ref())),
        Commands::Info(args) => commands::info::cmd_info(args, cli.json, &config, &config_sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => {
            let store: std::sync::Arc<dyn promptshelf_core::LibraryStore> = open_library()?.into();
            let rt = tokio::runtime::Runtime::new()
                .context("failed to create async runtime for MCP server")?;
            rt.block_on(commands::serve::cmd_serve(args, store, max_input))
        }
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
