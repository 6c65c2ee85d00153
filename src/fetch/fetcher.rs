//! Page loop.

use std::time::Duration;

use tracing::{error, info};

use super::{RateLimiter, TradeSource};
use crate::{
    error::FetchError,
    types::{PageIndex, RawTrade, Role},
};

/// How a fetch ended.
#[derive(Debug)]
pub enum FetchStatus {
    /// The last page was reached.
    Complete,

    /// A request failed; trades fetched before it are still returned.
    Aborted(FetchError),
}

/// Trades accumulated by [`Fetcher::fetch`].
#[derive(Debug)]
pub struct FetchOutcome {
    trades: Vec<RawTrade>,
    requests: usize,
    status: FetchStatus,
}

impl FetchOutcome {
    /// Trades in API order, page by page.
    pub fn trades(&self) -> &[RawTrade] {
        &self.trades
    }

    pub fn into_trades(self) -> Vec<RawTrade> {
        self.trades
    }

    /// Number of page requests issued.
    pub fn requests(&self) -> usize {
        self.requests
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, FetchStatus::Complete)
    }
}

/// Fetches every page of trades for a role from a [`TradeSource`].
#[derive(Debug)]
pub struct Fetcher<S> {
    source: S,
    limiter: RateLimiter,
}

impl<S: TradeSource> Fetcher<S> {
    pub fn new(source: S, rate_limit: Duration) -> Self {
        Self {
            source,
            limiter: RateLimiter::new(rate_limit),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Requests pages starting from zero until an empty or short page.
    ///
    /// Every request, the first one included, goes through the rate limiter.
    /// Stops at the first failed request and reports it in
    /// [`FetchOutcome::status`] instead of discarding what was fetched.
    pub async fn fetch(&mut self, role: Role) -> FetchOutcome {
        let page_size = self.source.page_size();
        let mut trades = Vec::new();
        let mut requests = 0;
        let mut page: PageIndex = 0;

        let status = loop {
            self.limiter.acquire().await;

            info!(%role, page, "Fetching trades page");
            requests += 1;
            let batch = match self.source.fetch_page(role, page).await {
                Ok(batch) => batch,
                Err(e) => {
                    error!(%role, page, %e, "Error fetching trades");
                    break FetchStatus::Aborted(e);
                }
            };

            if batch.is_empty() {
                info!(%role, "No more trades found");
                break FetchStatus::Complete;
            }

            let batch_len = batch.len();
            trades.extend(batch);

            if batch_len < page_size {
                info!(%role, "End of trades");
                break FetchStatus::Complete;
            }

            page += 1;
        };

        FetchOutcome {
            trades,
            requests,
            status,
        }
    }
}
