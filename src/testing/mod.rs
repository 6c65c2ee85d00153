//! Fixtures for tests that must not touch the network.
//!
//! [`RawTradeBuilder`] assembles API-shaped trade records field by field,
//! [`ScriptedSource`] replays a fixed sequence of pages and errors through the
//! [`TradeSource`] interface and records every request it receives.
//!

use std::{collections::VecDeque, future::Future};

use serde_json::{Map, Value, json};

use crate::{
    PAGE_SIZE,
    error::FetchError,
    fetch::TradeSource,
    types::{PageIndex, RawTrade, Role, VERIFIED_STATE},
};

/// Builder for [`RawTrade`] fixtures.
///
/// Starts from a verified trade with no parties, no dates and no contract;
/// every setter adds one field at its API path.
#[derive(Clone, Debug)]
pub struct RawTradeBuilder {
    root: Map<String, Value>,
}

impl Default for RawTradeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RawTradeBuilder {
    pub fn new() -> Self {
        let mut root = Map::new();
        root.insert("state".to_string(), json!(VERIFIED_STATE));
        Self { root }
    }

    fn set(mut self, path: &[&str], value: Value) -> Self {
        let (last, parents) = path.split_last().expect("RawTradeBuilder: empty path");
        let mut node = &mut self.root;
        for key in parents {
            let entry = node
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = entry
                .as_object_mut()
                .expect("RawTradeBuilder: parent is not an object");
        }
        node.insert(last.to_string(), value);
        self
    }

    pub fn id(self, id: impl Into<Value>) -> Self {
        self.set(&["id"], id.into())
    }

    pub fn state(self, state: impl Into<Value>) -> Self {
        self.set(&["state"], state.into())
    }

    pub fn buyer(self, steam_id: &str) -> Self {
        self.set(&["buyer", "steam_id"], json!(steam_id))
    }

    pub fn seller(self, steam_id: &str) -> Self {
        self.set(&["seller", "steam_id"], json!(steam_id))
    }

    /// Sets the steam ID of the party acting in `role`.
    pub fn party(self, role: Role, steam_id: &str) -> Self {
        match role {
            Role::Buyer => self.buyer(steam_id),
            Role::Seller => self.seller(steam_id),
        }
    }

    pub fn accepted_at(self, at: impl Into<Value>) -> Self {
        self.set(&["accepted_at"], at.into())
    }

    pub fn verified_at(self, at: impl Into<Value>) -> Self {
        self.set(&["verified_at"], at.into())
    }

    pub fn price(self, cents: impl Into<Value>) -> Self {
        self.set(&["contract", "price"], cents.into())
    }

    pub fn item_name(self, name: impl Into<Value>) -> Self {
        self.set(&["contract", "item", "market_hash_name"], name.into())
    }

    pub fn float_value(self, float: impl Into<Value>) -> Self {
        self.set(&["contract", "item", "float_value"], float.into())
    }

    pub fn type_name(self, type_name: impl Into<Value>) -> Self {
        self.set(&["contract", "item", "type_name"], type_name.into())
    }

    pub fn build(self) -> RawTrade {
        RawTrade::new(Value::Object(self.root))
    }
}

/// `count` verified trades with IDs `t{start}`, `t{start + 1}`, ...
pub fn trade_page(start: usize, count: usize) -> Vec<RawTrade> {
    (start..start + count)
        .map(|i| {
            RawTradeBuilder::new()
                .id(format!("t{i}"))
                .accepted_at("2024-01-01T00:00:00Z")
                .price(100)
                .build()
        })
        .collect()
}

/// [`TradeSource`] replaying scripted responses in order.
///
/// Once the script is exhausted every further request gets an empty page.
#[derive(Debug)]
pub struct ScriptedSource {
    responses: VecDeque<Result<Vec<RawTrade>, FetchError>>,
    requests: Vec<(Role, PageIndex)>,
    page_size: usize,
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            responses: VecDeque::new(),
            requests: Vec::new(),
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_page(mut self, trades: Vec<RawTrade>) -> Self {
        self.responses.push_back(Ok(trades));
        self
    }

    pub fn with_error(mut self, error: FetchError) -> Self {
        self.responses.push_back(Err(error));
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> &[(Role, PageIndex)] {
        &self.requests
    }
}

impl TradeSource for ScriptedSource {
    fn fetch_page(
        &mut self,
        role: Role,
        page: PageIndex,
    ) -> impl Future<Output = Result<Vec<RawTrade>, FetchError>> {
        self.requests.push((role, page));
        let response = self.responses.pop_front().unwrap_or_else(|| Ok(Vec::new()));
        async move { response }
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
