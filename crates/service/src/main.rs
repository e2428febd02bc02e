//! PhishGuard HTTP server

use anyhow::{Context, Result};
use clap::Parser;
use phishguard_service::config::CONFIG_ENV;
use phishguard_service::logging::init_logging;
use phishguard_service::{start_server, AppState, Detector, ServiceConfig};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "phishguard-server")]
#[command(about = "Phishing URL detection service", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file (falls back to $PHISHGUARD_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:5000
    #[arg(long)]
    bind: Option<String>,

    /// Model artifact (JSON)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Scaler artifact (JSON)
    #[arg(long)]
    scaler: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Disable the permissive CORS layer
    #[arg(long)]
    no_cors: bool,
}

impl Cli {
    fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    fn apply_overrides(&self, config: &mut ServiceConfig) {
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(scaler) = &self.scaler {
            config.scaler_path = scaler.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if self.no_cors {
            config.cors_enabled = false;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ServiceConfig::load(cli.config_path().as_deref())
        .context("failed to load configuration")?;
    config.apply_env_overrides();
    cli.apply_overrides(&mut config);
    config.validate().context("invalid configuration")?;

    init_logging(&config.log_level)?;
    info!("Starting PhishGuard v{}", phishguard_service::VERSION);

    let detector = Arc::new(Detector::from_config(&config));
    let addr = config.bind_addr()?;

    start_server(AppState::new(detector), addr, config.cors_enabled).await?;
    info!("PhishGuard stopped");
    Ok(())
}
