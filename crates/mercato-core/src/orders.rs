use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of looking up an order by its public order number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTracking {
    pub order_number: String,
    /// Backend fulfilment status, e.g. `"processing"` or `"shipped"`.
    pub status: String,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<String>,
    pub total: Decimal,
    pub items: Vec<OrderLine>,
}

impl OrderTracking {
    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u64,
    pub price: Decimal,
}
