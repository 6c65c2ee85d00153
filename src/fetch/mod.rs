//! Paginated, rate-limited retrieval of raw trades.
//!
//! # Architecture
//!
//! - [`TradeSource`] - a single page request, [`HttpTradeSource`] talks to the API
//! - [`RateLimiter`] - monotonic-clock gate in front of every request
//! - [`Fetcher`] - page loop producing a [`FetchOutcome`]
//!
//! # Example
//!
//! ```ignore
//! use csfloat_export::{Api, config::Credential, fetch::{Fetcher, HttpTradeSource}, types::Role};
//!
//! let source = HttpTradeSource::new(Api::csfloat(), Credential::new(api_key));
//! let mut fetcher = Fetcher::new(source, Duration::from_secs(120));
//!
//! let outcome = fetcher.fetch(Role::Buyer).await;
//! if !outcome.is_complete() {
//!     println!("partial result: {} trades", outcome.trades().len());
//! }
//! ```

mod fetcher;
mod limiter;
mod source;

pub use fetcher::{FetchOutcome, FetchStatus, Fetcher};
pub use limiter::RateLimiter;
pub use source::{HttpTradeSource, TradeSource};
