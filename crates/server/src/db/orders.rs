//! Order repository for database operations.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::SqlitePool;

use brightdesk_core::{CustomerId, OrderId, ProductId};

use super::RepositoryError;
use super::customers::now_rfc3339;
use crate::models::{Order, OrderReminder};

/// Filter criteria for listing orders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    /// Only orders placed at or after this instant.
    pub order_date_gte: Option<DateTime<Utc>>,
}

/// New order data for insertion. `product_ids` must already be the distinct
/// set and `total` the snapshot sum of their prices.
pub struct NewOrder<'a> {
    pub customer_id: CustomerId,
    pub product_ids: &'a [ProductId],
    pub order_date: DateTime<Utc>,
    pub total: Decimal,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new order with its product associations and snapshot total.
    ///
    /// The insert, association, and total write happen inside one
    /// transaction: a failure partway leaves no partially-associated order
    /// visible to other readers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any write fails (the
    /// transaction rolls back).
    pub async fn create(&self, new: NewOrder<'_>) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (order_id,): (i64,) = sqlx::query_as(
            "INSERT INTO orders (customer_id, order_date, total_amount, created_at) \
             VALUES (?, ?, '0', ?) \
             RETURNING id",
        )
        .bind(new.customer_id.as_i64())
        .bind(to_rfc3339(new.order_date))
        .bind(now_rfc3339())
        .fetch_one(&mut *tx)
        .await?;

        for product_id in new.product_ids {
            sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES (?, ?)")
                .bind(order_id)
                .bind(product_id.as_i64())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE orders SET total_amount = ? WHERE id = ?")
            .bind(new.total.to_string())
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        let row: OrderRow = sqlx::query_as(
            "SELECT id, customer_id, order_date, total_amount, created_at \
             FROM orders WHERE id = ?",
        )
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        row.into_domain(new.product_ids.to_vec())
    }

    /// Orders placed at or after the cutoff, joined with their customer,
    /// oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row fails to parse.
    pub async fn list_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<OrderReminder>, RepositoryError> {
        let rows: Vec<ReminderRow> = sqlx::query_as(
            "SELECT o.id, c.name AS customer_name, c.email AS customer_email, \
                    o.order_date, o.total_amount \
             FROM orders o \
             JOIN customers c ON c.id = o.customer_id \
             WHERE o.order_date >= ? \
             ORDER BY o.order_date",
        )
        .bind(to_rfc3339(cutoff))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ReminderRow::into_domain).collect()
    }

    /// List orders matching the filter, ordered by ID, with their distinct
    /// product sets attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a stored row fails to parse.
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, customer_id, order_date, total_amount, created_at \
             FROM orders \
             WHERE (? IS NULL OR order_date >= ?) \
             ORDER BY id",
        )
        .bind(filter.order_date_gte.map(to_rfc3339))
        .bind(filter.order_date_gte.map(to_rfc3339))
        .fetch_all(self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let product_ids = self.product_ids_for(OrderId::new(row.id)).await?;
            orders.push(row.into_domain(product_ids)?);
        }
        Ok(orders)
    }

    /// Order count and summed revenue across all orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored total fails to parse.
    pub async fn count_and_revenue(&self) -> Result<(i64, Decimal), RepositoryError> {
        let totals: Vec<(String,)> = sqlx::query_as("SELECT total_amount FROM orders")
            .fetch_all(self.pool)
            .await?;

        let mut revenue = Decimal::ZERO;
        let count = totals.len() as i64;
        for (raw,) in totals {
            revenue += parse_amount(&raw)?;
        }
        Ok((count, revenue))
    }

    async fn product_ids_for(&self, order_id: OrderId) -> Result<Vec<ProductId>, RepositoryError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT product_id FROM order_products WHERE order_id = ? ORDER BY product_id",
        )
        .bind(order_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| ProductId::new(id)).collect())
    }
}

/// Raw order row as stored.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    order_date: DateTime<Utc>,
    total_amount: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_domain(self, product_ids: Vec<ProductId>) -> Result<Order, RepositoryError> {
        Ok(Order {
            id: OrderId::new(self.id),
            customer_id: CustomerId::new(self.customer_id),
            product_ids,
            order_date: self.order_date,
            total_amount: parse_amount(&self.total_amount)?,
            created_at: self.created_at,
        })
    }
}

/// Raw reminder row from the customer join.
#[derive(Debug, sqlx::FromRow)]
struct ReminderRow {
    id: i64,
    customer_name: String,
    customer_email: String,
    order_date: DateTime<Utc>,
    total_amount: String,
}

impl ReminderRow {
    fn into_domain(self) -> Result<OrderReminder, RepositoryError> {
        Ok(OrderReminder {
            id: OrderId::new(self.id),
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            order_date: self.order_date,
            total_amount: parse_amount(&self.total_amount)?,
        })
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, RepositoryError> {
    raw.parse::<Decimal>().map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid total_amount in database: {e}"))
    })
}

fn to_rfc3339(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
