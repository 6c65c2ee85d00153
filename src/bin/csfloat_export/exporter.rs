//! Export run orchestration.
//!
//! Runs fetch, normalize and export for each role in turn, pausing one full
//! rate-limit interval between roles.

use csfloat_export::{
    Api,
    config::Config,
    export,
    fetch::{FetchStatus, Fetcher, HttpTradeSource, TradeSource},
    normalize,
    types::Role,
};
use tracing::{info, warn};

use crate::{config::Outputs, error::Result};

/// Summary of a single role export.
#[derive(Clone, Debug, PartialEq)]
pub struct RoleReport {
    pub role: Role,
    pub fetched: usize,
    pub exported: usize,
    pub complete: bool,
}

/// Trade exporter.
#[derive(Debug)]
pub struct TradeExporter {
    api: Api,
    config: Config,
    outputs: Outputs,
}

impl TradeExporter {
    pub fn new(api: Api, config: Config, outputs: Outputs) -> Self {
        info!(
            identity = %config.identity,
            rate_limit_secs = config.rate_limit.as_secs(),
            api = %api.base_url(),
            "Initializing CSFloat trade exporter"
        );
        Self {
            api,
            config,
            outputs,
        }
    }

    /// Export all given roles, in order.
    pub async fn run(&self, roles: &[Role]) -> Result<Vec<RoleReport>> {
        let mut reports = Vec::with_capacity(roles.len());
        for (i, &role) in roles.iter().enumerate() {
            if i > 0 {
                info!(
                    wait_secs = self.config.rate_limit.as_secs(),
                    "Waiting before fetching {}",
                    role.trade_kind()
                );
                tokio::time::sleep(self.config.rate_limit).await;
            }

            // Fresh client per role, dropped with the fetcher
            let source = HttpTradeSource::new(self.api.clone(), self.config.credential.clone());
            reports.push(self.run_role(source, role).await?);
        }

        info!("Done");
        Ok(reports)
    }

    /// Fetch, normalize and export the trades of a single role.
    pub async fn run_role<S: TradeSource>(&self, source: S, role: Role) -> Result<RoleReport> {
        let kind = role.trade_kind();

        let mut fetcher = Fetcher::new(source, self.config.rate_limit);
        let outcome = fetcher.fetch(role).await;
        info!(count = outcome.trades().len(), "Found {kind}");

        if let FetchStatus::Aborted(e) = outcome.status() {
            warn!(%e, requests = outcome.requests(), "Fetching {kind} stopped early, exporting partial data");
        }

        let trades = normalize::normalize(outcome.trades(), role, &self.config.identity);
        info!(count = trades.len(), "Processed valid {kind}");

        let exported = export::export(&trades, self.outputs.path(role))?;

        Ok(RoleReport {
            role,
            fetched: outcome.trades().len(),
            exported,
            complete: outcome.is_complete(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use csfloat_export::{
        config::Credential,
        error::FetchError,
        testing::{RawTradeBuilder, ScriptedSource},
    };

    use super::*;

    fn exporter(dir: &std::path::Path) -> TradeExporter {
        TradeExporter::new(
            Api::csfloat(),
            Config::new("123", Credential::new("key")).with_rate_limit(Duration::from_secs(120)),
            Outputs {
                purchases: dir.join("purchases.csv"),
                sales: dir.join("sales.csv"),
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_role_exports_matching_trades() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter(dir.path());
        let source = ScriptedSource::new().with_page(vec![
            RawTradeBuilder::new()
                .seller("123")
                .price(10000)
                .item_name("AK-47")
                .float_value("0.15")
                .type_name("Rifle")
                .accepted_at("2023-01-15T00:00:00Z")
                .id("abc")
                .build(),
            RawTradeBuilder::new()
                .seller("999")
                .accepted_at("2023-01-15T00:00:00Z")
                .build(),
        ]);

        let report = exporter.run_role(source, Role::Seller).await.unwrap();

        assert_eq!(
            report,
            RoleReport {
                role: Role::Seller,
                fetched: 2,
                exported: 1,
                complete: true,
            }
        );
        let content = std::fs::read_to_string(dir.path().join("sales.csv")).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "Item Name,Price,Float,Type,Date,CSFloat Transaction ID");
        assert_eq!(lines[1], "AK-47,98.00,0.15,Rifle,2023-01-15,abc");
        assert!(!dir.path().join("purchases.csv").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_role_exports_partial_data() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter(dir.path());
        let source = ScriptedSource::new()
            .with_page_size(1)
            .with_page(vec![
                RawTradeBuilder::new()
                    .buyer("123")
                    .verified_at("2023-03-01T00:00:00Z")
                    .build(),
            ])
            .with_error(FetchError::Transport("connection reset".to_string()));

        let report = exporter.run_role(source, Role::Buyer).await.unwrap();

        assert!(!report.complete);
        assert_eq!(report.exported, 1);
        let content = std::fs::read_to_string(dir.path().join("purchases.csv")).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
