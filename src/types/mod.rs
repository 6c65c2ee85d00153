mod raw;
mod role;
mod trade;

pub use raw::{RawTrade, TradesPage};
pub use role::Role;
pub use trade::{NormalizedTrade, Price};

/// State of a settled trade.
pub const VERIFIED_STATE: &str = "verified";

/// Placeholder for missing item name or type.
pub const UNKNOWN: &str = "Unknown";

/// Index of a trades page, starting from zero.
pub type PageIndex = u32;
