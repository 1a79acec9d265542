use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tasker_server::ServerConfig;
use tasker_settings::load_settings_from_path;
use tasker_store::{ConnectionConfig, TaskStore};
use tasker_telemetry::{TelemetryConfig, init_telemetry};

/// Task-tracking REST API backed by SQLite.
#[derive(Debug, Parser)]
#[command(name = "tasker", version)]
struct Cli {
    /// JSON config file. Environment variables take precedence over it.
    #[arg(long, short, default_value = "config.json")]
    config: PathBuf,

    /// Emit JSON log lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings_from_path(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let _ = init_telemetry(&TelemetryConfig {
        level: settings.log_level.clone(),
        json: cli.json_logs,
    });
    tracing::info!(?settings, "starting tasker");

    let store = TaskStore::open(&settings.sqlite, &ConnectionConfig::default())
        .with_context(|| format!("opening database {}", settings.sqlite.display()))?;

    let config = ServerConfig {
        host: settings.host,
        port: settings.port,
    };
    let handle = tasker_server::start(config, store)
        .await
        .context("starting HTTP server")?;

    tokio::signal::ctrl_c()
        .await
        .context("listening for ctrl+c")?;

    tracing::info!("shutting down");
    handle.shutdown().await;
    Ok(())
}
