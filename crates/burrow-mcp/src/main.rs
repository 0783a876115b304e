//! Burrow MCP Server
//!
//! This binary runs a fresh in-memory filesystem as an MCP server over stdio.
//! The filesystem lives exactly as long as the process.

use std::path::PathBuf;

use anyhow::Context;
use burrow::FsConfig;
use burrow::tools::FsToolbox;
use burrow_mcp::BurrowServer;
use clap::Parser;
use rmcp::ServiceExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Burrow MCP Server - a session-scoped filesystem for agents
#[derive(Parser, Debug)]
#[command(name = "burrow-mcp")]
#[command(about = "MCP server exposing an in-memory filesystem over stdio")]
struct Args {
    /// JSON config with `initial_dirs` and `cwd`
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Output to stderr so it doesn't interfere with MCP stdio
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => FsConfig::load(path)?,
        None => FsConfig::default(),
    };
    let toolbox = FsToolbox::with_config(&config).context("failed to initialize filesystem")?;

    tracing::info!(dirs = ?config.initial_dirs, cwd = %config.cwd, "Starting Burrow MCP server");

    let service = BurrowServer::new(toolbox)
        .serve(rmcp::transport::stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("Failed to start MCP service: {}", e);
        })?;

    tracing::info!("Burrow MCP server running");

    service.waiting().await?;

    tracing::info!("Burrow MCP server shutting down");

    Ok(())
}
