//! Serve command: run the MCP server on stdio.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use promptshelf_core::LibraryStore;

use crate::server::ShelfServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP over stdin/stdout until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    store: Arc<dyn LibraryStore>,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    info!(library = %store.describe(), "starting MCP server on stdio");

    let server = ShelfServer::new(store, max_input);
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server stopped")?;

    info!("MCP server shut down");
    Ok(())
}
