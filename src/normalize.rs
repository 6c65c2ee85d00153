//! Filtering and conversion of raw trades into export rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use fastnum::{D128, decimal::Context};
use serde_json::Value;
use tracing::debug;

use crate::types::{NormalizedTrade, Price, RawTrade, Role, UNKNOWN, VERIFIED_STATE};

/// Share of the sale price the seller receives after the 2% marketplace fee.
const SELLER_FEE_FACTOR: f64 = 0.98;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Naive ISO-8601 date-time layouts accepted besides RFC 3339.
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Keeps the verified trades of `identity` acting as `role` and converts them
/// into rows sorted by date, oldest first.
///
/// Records failing a filter are skipped, never reported as errors. Trades
/// with equal dates keep their input order.
pub fn normalize(trades: &[RawTrade], role: Role, identity: &str) -> Vec<NormalizedTrade> {
    let mut normalized: Vec<_> = trades
        .iter()
        .filter_map(|trade| normalize_trade(trade, role, identity))
        .collect();
    normalized.sort_by(|a, b| a.date.cmp(&b.date));
    normalized
}

/// Converts a single trade, or `None` if it does not belong in the export.
pub fn normalize_trade(trade: &RawTrade, role: Role, identity: &str) -> Option<NormalizedTrade> {
    if trade.steam_id(role) != Some(identity) {
        return None;
    }
    if trade.state() != Some(VERIFIED_STATE) {
        return None;
    }
    let Some(date) = trade_date(trade) else {
        debug!(id = ?trade.id(), "Skipping trade without date");
        return None;
    };

    Some(NormalizedTrade {
        item_name: trade.market_hash_name().unwrap_or(UNKNOWN).to_string(),
        price: format_price(trade.price(), role.is_sale()),
        float_value: parse_float(trade.float_value()),
        item_type: trade.type_name().unwrap_or(UNKNOWN).to_string(),
        date: format_date(date),
        transaction_id: trade.id().unwrap_or_default(),
    })
}

/// Acceptance time, or verification time if the trade has none.
fn trade_date(trade: &RawTrade) -> Option<&str> {
    trade
        .accepted_at()
        .filter(|at| !at.is_empty())
        .or_else(|| trade.verified_at().filter(|at| !at.is_empty()))
}

/// Converts a price in cents to dollars rounded to cents.
///
/// Sales additionally lose the 2% seller fee, rounded to cents again. A
/// missing or non-numeric price is zero.
///
/// Both steps round the binary `f64` value to two places, ties to even, so 75
/// cents sold nets 0.73.
pub fn format_price(cents: Option<&Value>, is_sale: bool) -> Price {
    price_in_dollars(cents, is_sale)
        .map(Price::new)
        .unwrap_or(Price::ZERO)
}

fn price_in_dollars(cents: Option<&Value>, is_sale: bool) -> Option<D128> {
    let cents = match cents? {
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    let mut price = round_cents(cents / 100.0)?;
    if is_sale {
        price = round_cents(price * SELLER_FEE_FACTOR)?;
    }
    D128::from_str(&format!("{price:.2}"), Context::default()).ok()
}

/// Rounds to two decimal places as `{:.2}` renders the value.
fn round_cents(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    format!("{value:.2}").parse().ok()
}

/// Item float from a JSON number or numeric string.
///
/// `NaN` and infinities read as absent.
pub fn parse_float(value: Option<&Value>) -> Option<D128> {
    let text = match value? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    D128::from_str(&text, Context::default())
        .ok()
        .filter(|float| float.is_finite())
}

/// Formats a timestamp as `YYYY-MM-DD`.
///
/// Tries a strict ISO-8601 parse first. Malformed input still yields a date:
/// the part before the first `T` if there is one, otherwise the first ten
/// characters.
pub fn format_date(raw: &str) -> String {
    if let Some(date) = parse_iso_date(raw) {
        return date.format(DATE_FORMAT).to_string();
    }
    if let Some((date, _)) = raw.split_once('T') {
        return date.to_string();
    }
    raw.chars().take(10).collect()
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    if !has_padded_date(raw) {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.date_naive());
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(at.date());
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Whether `raw` starts with a `YYYY-MM-DD` date using exactly four, two and
/// two digits. chrono alone also accepts `2023-5-1`.
fn has_padded_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 10
        && bytes[..10].iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
