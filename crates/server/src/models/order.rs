//! Order domain model and mutation shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use brightdesk_core::{CustomerId, OrderId, ProductId};

/// An order placed by a customer for a set of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The customer who placed the order.
    pub customer_id: CustomerId,
    /// Distinct products on the order.
    pub product_ids: Vec<ProductId>,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
    /// Sum of the referenced products' prices at creation time. A snapshot:
    /// never recomputed when product prices change. Serialized as a decimal
    /// string.
    pub total_amount: Decimal,
    /// When the order row was created.
    pub created_at: DateTime<Utc>,
}

/// Input for the `createOrder` mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
    /// The ordering customer.
    pub customer_id: CustomerId,
    /// Products to order; duplicates are collapsed to the distinct set.
    pub product_ids: Vec<ProductId>,
    /// When the order was placed (default: now).
    pub order_date: Option<DateTime<Utc>>,
}

/// Result of the `createOrder` mutation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResult {
    /// The created order, absent on validation failure.
    pub order: Option<Order>,
    /// Human-readable outcome message.
    pub message: String,
}

/// An order joined with its customer, as needed by the reminder job.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReminder {
    /// Order ID.
    pub id: OrderId,
    /// Customer display name.
    pub customer_name: String,
    /// Customer email address.
    pub customer_email: String,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
    /// Order total. Serialized as a decimal string.
    pub total_amount: Decimal,
}
