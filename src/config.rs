//! Run configuration shared by the fetcher and the normalizer.

use std::time::Duration;

/// Default pause between two API requests.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_secs(120);

/// API key sent in the `Authorization` header.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct Credential(#[debug("<redacted>")] String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Settings loaded once at startup and immutable for the run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Steam ID trades are filtered on.
    pub identity: String,

    /// API key.
    pub credential: Credential,

    /// Minimum time between two API requests.
    pub rate_limit: Duration,
}

impl Config {
    pub fn new(identity: impl Into<String>, credential: Credential) -> Self {
        Self {
            identity: identity.into(),
            credential,
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }

    pub fn with_rate_limit(mut self, rate_limit: Duration) -> Self {
        self.rate_limit = rate_limit;
        self
    }
}
