use std::future::Future;

use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    Api, PAGE_SIZE,
    config::Credential,
    error::FetchError,
    types::{PageIndex, RawTrade, Role, TradesPage},
};

/// Source of trade pages.
pub trait TradeSource {
    /// Requests a single page of trades.
    ///
    /// A page is returned only if it was read and decoded completely.
    fn fetch_page(
        &mut self,
        role: Role,
        page: PageIndex,
    ) -> impl Future<Output = Result<Vec<RawTrade>, FetchError>>;

    /// Maximum number of records in a page; a shorter page is the last one.
    fn page_size(&self) -> usize {
        PAGE_SIZE
    }
}

/// [`TradeSource`] backed by the CSFloat HTTP API.
///
/// Owns its own HTTP client, so connections live only as long as the source.
#[derive(Debug)]
pub struct HttpTradeSource {
    client: Client,
    api: Api,
    credential: Credential,
}

impl HttpTradeSource {
    pub fn new(api: Api, credential: Credential) -> Self {
        Self {
            client: Client::new(),
            api,
            credential,
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }
}

impl TradeSource for HttpTradeSource {
    async fn fetch_page(&mut self, role: Role, page: PageIndex) -> Result<Vec<RawTrade>, FetchError> {
        let url = self.api.trades_url(role, page)?;
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.credential.expose())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = response.bytes().await?;
        let page: TradesPage = serde_json::from_slice(&body)?;
        Ok(page.into_trades())
    }

    fn page_size(&self) -> usize {
        self.api.page_size()
    }
}
