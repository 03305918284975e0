//! kousei-server - web API and dashboard for the Kousei spell checker.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use kousei_server::AppConfig;

/// Web API and dashboard for the Kousei spell checker
#[derive(Parser)]
#[command(name = "kousei-server")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "KOUSEI_CONFIG")]
    config: Option<PathBuf>,

    /// Listen host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Lexicon database path (overrides config)
    #[arg(long, env = "KOUSEI_DB")]
    db: Option<PathBuf>,

    /// Model directory (overrides config)
    #[arg(long, env = "KOUSEI_MODEL_DIR")]
    models_dir: Option<PathBuf>,

    /// Run rules-only, never loading the masked-LM
    #[arg(long)]
    no_model: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("starting kousei-server v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    // Command-line flags take priority over file and environment.
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(db) = cli.db {
        config.store.path = db;
    }
    if let Some(dir) = cli.models_dir {
        config.model.dir = Some(dir);
    }
    if cli.no_model {
        config.model.enabled = false;
    }

    kousei_server::run(config).await
}
