use std::fmt;

/// Side of the trade the account took.
///
/// * [`Role::Buyer`] trades are purchases, matched on `buyer.steam_id`,
///   priced as paid.
/// * [`Role::Seller`] trades are sales, matched on `seller.steam_id`,
///   priced net of the marketplace fee.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    /// All roles in the order they are exported.
    pub const ALL: [Role; 2] = [Role::Buyer, Role::Seller];

    /// Name used by the API in the `role` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }

    /// What the trades of this role are, as used in diagnostics.
    pub fn trade_kind(&self) -> &'static str {
        match self {
            Role::Buyer => "purchases",
            Role::Seller => "sales",
        }
    }

    /// Whether the seller fee is deducted from prices of this role.
    pub fn is_sale(&self) -> bool {
        matches!(self, Role::Seller)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
