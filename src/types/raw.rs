use serde::Deserialize;
use serde_json::Value;

use super::Role;

/// Trade record as returned by the API.
///
/// The record is kept as untyped JSON. Accessors read the few fields the
/// export needs and return `None` for anything missing, `null` or of an
/// unexpected type, so a single odd record never fails a whole page.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawTrade(Value);

impl RawTrade {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    fn str_at(&self, pointer: &str) -> Option<&str> {
        self.0.pointer(pointer).and_then(Value::as_str)
    }

    fn value_at(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer).filter(|v| !v.is_null())
    }

    /// Trade state, `verified` once settled.
    pub fn state(&self) -> Option<&str> {
        self.str_at("/state")
    }

    /// Steam ID of the trade party acting in the given role.
    pub fn steam_id(&self, role: Role) -> Option<&str> {
        match role {
            Role::Buyer => self.str_at("/buyer/steam_id"),
            Role::Seller => self.str_at("/seller/steam_id"),
        }
    }

    pub fn accepted_at(&self) -> Option<&str> {
        self.str_at("/accepted_at")
    }

    pub fn verified_at(&self) -> Option<&str> {
        self.str_at("/verified_at")
    }

    /// Contract price in cents, unparsed.
    pub fn price(&self) -> Option<&Value> {
        self.value_at("/contract/price")
    }

    pub fn market_hash_name(&self) -> Option<&str> {
        self.str_at("/contract/item/market_hash_name")
    }

    /// Item float (wear), either a JSON number or a numeric string.
    pub fn float_value(&self) -> Option<&Value> {
        self.value_at("/contract/item/float_value")
    }

    pub fn type_name(&self) -> Option<&str> {
        self.str_at("/contract/item/type_name")
    }

    /// Transaction ID; numeric IDs are rendered as text.
    pub fn id(&self) -> Option<String> {
        match self.value_at("/id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<Value> for RawTrade {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Body of a trades page response.
#[derive(Debug, Default, Deserialize)]
pub struct TradesPage {
    #[serde(default)]
    trades: Option<Vec<RawTrade>>,
}

impl TradesPage {
    pub fn into_trades(self) -> Vec<RawTrade> {
        self.trades.unwrap_or_default()
    }
}
