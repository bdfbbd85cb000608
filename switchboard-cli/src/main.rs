use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use switchboard_server::{RelayConfig, serve};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// WebRTC signaling relay: pairs browser peers by connection id and forwards
/// their offers, answers and candidates.
#[derive(Parser, Debug)]
#[command(name = "switchboard", version)]
struct Cli {
    /// Address the HTTP/WebSocket listener binds to.
    #[arg(long, env = "SWITCHBOARD_BIND", default_value = "0.0.0.0:5000")]
    bind: SocketAddr,

    /// Capacity of the coordinator command queue.
    #[arg(long, env = "SWITCHBOARD_COMMAND_BUFFER", default_value_t = 100)]
    command_buffer: usize,

    /// Per-connection outbound queue; a client that falls this far behind
    /// misses messages.
    #[arg(long, env = "SWITCHBOARD_OUTBOUND_BUFFER", default_value_t = 64)]
    outbound_buffer: usize,

    /// Drop calls to unknown targets without sending `call-failed`.
    #[arg(long, env = "SWITCHBOARD_SILENT_UNKNOWN_TARGET")]
    silent_unknown_target: bool,

    /// Allowed CORS origin; repeat or comma-separate. Any origin when unset.
    #[arg(
        long = "allowed-origin",
        env = "SWITCHBOARD_ALLOWED_ORIGINS",
        value_delimiter = ','
    )]
    allowed_origins: Vec<String>,
}

impl From<Cli> for RelayConfig {
    fn from(cli: Cli) -> Self {
        Self {
            bind_addr: cli.bind,
            command_buffer: cli.command_buffer,
            outbound_buffer: cli.outbound_buffer,
            report_unknown_target: !cli.silent_unknown_target,
            allowed_origins: cli.allowed_origins,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from(Cli::parse());
    info!("Starting signaling relay with {:?}", config);

    serve(config, shutdown_signal())
        .await
        .context("Signaling relay stopped with an error")?;

    info!("Signaling relay shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
