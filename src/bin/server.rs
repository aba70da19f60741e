//! Targetprocess MCP server binary.
//!
//! Startup order: configuration, backend client, tool registry, stdio
//! transport. Configuration failures abort before any client exists; the
//! cache warm-up runs in the background and never blocks serving.

use std::sync::Arc;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rmcp::{ServiceExt, transport::stdio};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tp_mcp::config::Config;
use tp_mcp::mcp::TpServer;
use tp_mcp::tp::TpClient;

#[derive(Parser)]
#[command(name = "tp-mcp")]
#[command(version, about = "Targetprocess MCP server over stdio", long_about = None)]
struct Cli {}

/// Logging goes to stderr only; stdout is reserved for the MCP stream.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tp_mcp=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    let _ = rustls::crypto::ring::default_provider().install_default();
    init_tracing();

    let config = Config::load()?;
    info!(domain = %config.domain, "configuration resolved");

    let client = Arc::new(TpClient::new(&config));
    let server = TpServer::new(client);

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| {
            error!(error = %e, "failed to start MCP transport");
        })
        .into_diagnostic()?;
    info!("tp-mcp ready, serving MCP over stdio");

    tokio::select! {
        result = service.waiting() => {
            let reason = result.into_diagnostic()?;
            info!(?reason, "transport closed");
        }
        _ = tokio::signal::ctrl_c() => {
            // Dropping the running service closes the transport.
            info!("termination signal received, shutting down");
        }
    }

    Ok(())
}
