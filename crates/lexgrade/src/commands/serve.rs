//! Serve command — MCP server over stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use lexgrade_core::Config;

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // Transport is always stdio; stdout carries the protocol.
}

/// Run the MCP server until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    info!(
        max_input_bytes = ?config.input_limit(),
        "starting MCP server on stdio"
    );

    let service = ProjectServer::with_config(&config)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server terminated abnormally")?;

    info!("MCP server stopped");
    Ok(())
}
