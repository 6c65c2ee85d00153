//! CSFloat trade exporter.
//!
//! This binary fetches the account's verified CSFloat trades and writes
//! purchases and sales to two CSV files.

mod config;
mod error;
mod exporter;

use clap::Parser;
use csfloat_export::{Api, config::Config};
use std::process::exit;
use tracing::{error, info, warn};

use config::{CliConfig, ConfigError, EnvConfig};
use error::Error;
use exporter::TradeExporter;

fn load_config(cli_config: &CliConfig) -> error::Result<(Config, Api)> {
    let config = EnvConfig::from_env()?.into_config()?;
    let api = cli_config.api()?;
    Ok((config, api))
}

#[tokio::main]
async fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    // Parse CLI arguments
    let cli_config = CliConfig::parse();

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (config, api) = match load_config(&cli_config) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            if matches!(e, Error::Config(ConfigError::MissingApiKey)) {
                error!(
                    "Please create a .env file with API_KEY=<your csfloat api key> \
                     or set it as an environment variable"
                );
            }
            exit(1);
        }
    };

    if config.identity.is_empty() {
        warn!("STEAM_ID is not set, no trades will match");
    }

    let exporter = TradeExporter::new(api, config, cli_config.outputs());
    let reports = match exporter.run(&cli_config.roles()).await {
        Ok(reports) => reports,
        Err(e) => {
            error!(%e, "Trade export failed");
            exit(1);
        }
    };

    for report in &reports {
        info!(
            role = %report.role,
            fetched = report.fetched,
            exported = report.exported,
            complete = report.complete,
            "Export summary"
        );
    }
}
