//! Order mutation service: `createOrder`.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::info;

use brightdesk_core::ProductId;

use crate::db::RepositoryError;
use crate::db::customers::CustomerRepository;
use crate::db::orders::{NewOrder, OrderRepository};
use crate::db::products::ProductRepository;
use crate::models::{CreateOrderInput, CreateOrderResult};

const MSG_CREATED: &str = "Order created successfully";
const MSG_BAD_CUSTOMER: &str = "Invalid customer ID";
const MSG_NO_PRODUCTS: &str = "At least one product must be selected";
const MSG_BAD_PRODUCTS: &str = "One or more product IDs are invalid";

/// Service for order mutations.
pub struct OrderService {
    pool: SqlitePool,
}

impl OrderService {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an order.
    ///
    /// Requested product IDs are collapsed to the distinct set before
    /// resolution (the association has set semantics), so duplicates in the
    /// request are not flagged as invalid as long as every distinct ID
    /// resolves. The total is the sum of the distinct products' prices at
    /// creation time and is never recomputed afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only for storage failures.
    pub async fn create(
        &self,
        input: CreateOrderInput,
    ) -> Result<CreateOrderResult, RepositoryError> {
        if !CustomerRepository::new(&self.pool)
            .exists(input.customer_id)
            .await?
        {
            return Ok(failure(MSG_BAD_CUSTOMER));
        }

        if input.product_ids.is_empty() {
            return Ok(failure(MSG_NO_PRODUCTS));
        }

        let distinct = distinct_ids(&input.product_ids);
        let products = ProductRepository::new(&self.pool)
            .get_by_ids(&distinct)
            .await?;

        if products.len() != distinct.len() {
            return Ok(failure(MSG_BAD_PRODUCTS));
        }

        let total: Decimal = products.iter().map(|p| p.price).sum();
        let order_date = input.order_date.unwrap_or_else(Utc::now);

        let order = OrderRepository::new(&self.pool)
            .create(NewOrder {
                customer_id: input.customer_id,
                product_ids: &distinct,
                order_date,
                total,
            })
            .await?;

        info!(order_id = %order.id, total = %order.total_amount, "Created order");

        Ok(CreateOrderResult {
            order: Some(order),
            message: MSG_CREATED.to_owned(),
        })
    }
}

/// Deduplicate while preserving first-occurrence order.
fn distinct_ids(ids: &[ProductId]) -> Vec<ProductId> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(**id))
        .copied()
        .collect()
}

fn failure(message: &str) -> CreateOrderResult {
    CreateOrderResult {
        order: None,
        message: message.to_owned(),
    }
}
