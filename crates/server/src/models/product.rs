//! Product domain model and mutation shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use brightdesk_core::ProductId;

/// A product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name. No uniqueness constraint: identical creations yield
    /// distinct records.
    pub name: String,
    /// Unit price, always positive. Serialized as a decimal string.
    pub price: Decimal,
    /// Units in stock, never negative.
    pub stock: i64,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

/// Input for the `createProduct` mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    /// Product name.
    pub name: String,
    /// Unit price as a decimal string.
    pub price: Decimal,
    /// Initial stock (default 0).
    pub stock: Option<i64>,
}

/// Result of the `createProduct` mutation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductResult {
    /// The created product, absent on validation failure.
    pub product: Option<Product>,
    /// Human-readable outcome message.
    pub message: String,
}

/// Result of the `updateLowStockProducts` mutation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLowStockResult {
    /// Products whose stock was incremented, with their new stock levels.
    pub updated_products: Vec<Product>,
    /// Human-readable outcome message; carries the failure detail when the
    /// scan or update fails.
    pub message: String,
    /// Number of products updated.
    pub count: usize,
}
