use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One synthesized sales transaction, in insert column order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleRow {
    pub sale_date: DateTime<Utc>,
    pub customer_id: i32,
    pub product_id: i32,
    pub store_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub discount: f64,
    pub total_amount: f64,
    pub payment_type: String,
    pub status: String,
    pub remarks: String,
}

/// Parameters a batch was generated from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSpec {
    pub seed: u64,
    pub rows: usize,
    pub anchor: DateTime<Utc>,
}
