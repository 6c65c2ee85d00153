//! CSFloat trade history exporter.
//!
//! # Overview
//!
//! Pulls the account's verified trades from the CSFloat API and flattens them
//! into two CSV tables, one for purchases and one for sales.
//!
//! Use [`fetch::Fetcher`] to page through all trades of a [`types::Role`]
//! under the API rate limit, [`normalize::normalize`] to filter and convert
//! them into [`types::NormalizedTrade`] rows, and [`export::export`] to write
//! the table.
//!
//! # Limitations/follow-ups
//!
//! * Fetching is best effort: a failed page stops the loop and whatever was
//!   accumulated is exported. [`fetch::FetchOutcome::status`] tells the two
//!   cases apart.
//!
//! * Date parsing falls back to string slicing for malformed timestamps,
//!   see [`normalize::format_date`].
//!
//! # Testing
//!
//! [`testing`] module provides raw trade fixtures and a scripted
//! [`fetch::TradeSource`] that never touches the network.

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod normalize;
pub mod testing;
pub mod types;

use url::Url;

/// Number of records requested per page.
pub const PAGE_SIZE: usize = 500;

const CSFLOAT_API_URL: &str = "https://csfloat.com/api/v1/";

#[derive(Clone, Debug)]
/// API endpoint the trades are fetched from.
pub struct Api {
    base_url: Url,
    page_size: usize,
}

impl Api {
    pub fn csfloat() -> Self {
        Self {
            base_url: Url::parse(CSFLOAT_API_URL).expect("Api: valid CSFloat URL"),
            page_size: PAGE_SIZE,
        }
    }

    pub fn custom(base_url: Url, page_size: usize) -> Self {
        Self {
            base_url,
            page_size,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// URL of a single trades page for the given role.
    pub fn trades_url(&self, role: types::Role, page: types::PageIndex) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join("me/trades")?;
        url.query_pairs_mut()
            .append_pair("role", role.as_str())
            .append_pair("state", types::VERIFIED_STATE)
            .append_pair("limit", &self.page_size.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::csfloat()
    }
}
