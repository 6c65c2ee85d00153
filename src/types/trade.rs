use std::fmt;

use fastnum::D128;

/// Dollar amount with two fraction digits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Price(D128);

impl Price {
    pub const ZERO: Price = Price(D128::ZERO);

    /// Wraps an amount, rounding it to cents.
    pub fn new(value: D128) -> Self {
        Self(value.rescale(2))
    }

    pub fn value(&self) -> D128 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.rescale(2))
    }
}

/// Trade flattened into a single export row.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedTrade {
    /// Market hash name of the item.
    pub item_name: String,

    /// Price paid, or net proceeds for sales.
    pub price: Price,

    /// Item float, `None` when missing or not numeric.
    pub float_value: Option<D128>,

    /// Item type name.
    pub item_type: String,

    /// Trade date, `YYYY-MM-DD`.
    pub date: String,

    /// CSFloat transaction ID, possibly empty.
    pub transaction_id: String,
}

impl NormalizedTrade {
    /// Row in export column order.
    pub fn to_record(&self) -> [String; 6] {
        [
            self.item_name.clone(),
            self.price.to_string(),
            self.float_value.map(|f| f.to_string()).unwrap_or_default(),
            self.item_type.clone(),
            self.date.clone(),
            self.transaction_id.clone(),
        ]
    }
}
