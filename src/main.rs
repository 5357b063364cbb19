//! Scatterboard server
//!
//! Run with: cargo run --bin scatterboard
//!
//! # Configuration
//!
//! Config file lookup: `--config`, then `~/.config/scatterboard/config.toml`,
//! `/etc/scatterboard/config.toml`, `./config.toml`.
//!
//! Environment variables:
//! - `SCATTERBOARD_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SCATTERBOARD_PORT`: Port to listen on (default: 8501)
//! - `SCATTERBOARD_SEED`: Generator seed (default: 42)
//! - `SCATTERBOARD_LOG_LEVEL`: Log level (default: info)
//! - `SCATTERBOARD_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full filter directive, overrides the level

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use scatterboard::api::{serve, ApiConfig, AppState};
use scatterboard::config::Config;
use scatterboard::logging;
use scatterboard::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "scatterboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Animated scatter dashboard over synthetic business data")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Generator seed
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, source) = match &args.config {
        Some(path) => (
            Config::load_with_env(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            Some(path.clone()),
        ),
        None => Config::load_default().context("loading default config")?,
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(seed) = args.seed {
        config.dataset.seed = seed;
    }

    logging::init(&config.logging);

    match &source {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("Using default config with environment overrides"),
    }

    tracing::info!("Starting Scatterboard v{}", env!("CARGO_PKG_VERSION"));

    let spec = config.dataset_spec().context("invalid dataset configuration")?;
    tracing::info!(
        seed = spec.seed(),
        year = spec.year(),
        departments = spec.departments().len(),
        rows = spec.row_count(),
        "Dataset configured"
    );

    let api_config = ApiConfig::from(config.server.clone());
    let state = AppState::new(Pipeline::new(spec, config.chart.clone()), api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Scatterboard stopped");
    Ok(())
}
