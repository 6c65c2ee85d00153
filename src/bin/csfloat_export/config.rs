//! Configuration for the exporter.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): account and API key
//! - CLI arguments: output files and endpoint

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{Parser, ValueEnum};
use csfloat_export::{
    Api, PAGE_SIZE,
    config::{Config, Credential, DEFAULT_RATE_LIMIT},
    types::Role,
};
use url::Url;

/// Environment configuration (account, credentials).
#[derive(serde::Deserialize, derive_more::Debug)]
pub struct EnvConfig {
    /// Steam ID of the account whose trades are exported
    pub steam_id: Option<String>,

    /// CSFloat API key
    #[debug(skip)]
    pub api_key: Option<String>,

    /// Optional pause between API requests (default: 120s)
    pub rate_limit_seconds: Option<u64>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Validate into the run configuration.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let rate_limit = self
            .rate_limit_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RATE_LIMIT);

        Ok(Config::new(self.steam_id.unwrap_or_default(), Credential::new(api_key))
            .with_rate_limit(rate_limit))
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    /// Purchases only
    Buyer,
    /// Sales only
    Seller,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Buyer => Role::Buyer,
            RoleArg::Seller => Role::Seller,
        }
    }
}

/// CLI arguments for the export run.
#[derive(Debug, Parser)]
#[command(name = "csfloat-export")]
#[command(about = "Export CSFloat purchases and sales to CSV files")]
pub struct CliConfig {
    /// Output file for purchases
    #[arg(long, default_value = "csfloat_purchases.csv")]
    pub purchases: PathBuf,

    /// Output file for sales
    #[arg(long, default_value = "csfloat_sales.csv")]
    pub sales: PathBuf,

    /// CSFloat API base URL
    #[arg(long, default_value = "https://csfloat.com/api/v1/")]
    pub api_url: String,

    /// Export only one side (default: purchases, then sales)
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,
}

impl CliConfig {
    /// Roles to export, in order.
    pub fn roles(&self) -> Vec<Role> {
        match self.role {
            Some(role) => vec![role.into()],
            None => Role::ALL.to_vec(),
        }
    }

    pub fn outputs(&self) -> Outputs {
        Outputs {
            purchases: self.purchases.clone(),
            sales: self.sales.clone(),
        }
    }

    /// Parse the API endpoint; the base URL is treated as a directory.
    pub fn api(&self) -> Result<Api, ConfigError> {
        let mut base_url = Url::parse(&self.api_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Api::custom(base_url, PAGE_SIZE))
    }
}

/// Output file per role.
#[derive(Clone, Debug)]
pub struct Outputs {
    pub purchases: PathBuf,
    pub sales: PathBuf,
}

impl Outputs {
    pub fn path(&self, role: Role) -> &Path {
        match role {
            Role::Buyer => &self.purchases,
            Role::Seller => &self.sales,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_KEY not found in environment variables")]
    MissingApiKey,

    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),
}
