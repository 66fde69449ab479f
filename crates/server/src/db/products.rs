//! Product repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::SqlitePool;

use brightdesk_core::ProductId;

use super::RepositoryError;
use super::customers::now_rfc3339;
use crate::models::Product;

/// Filter criteria for listing products.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Case-sensitive substring match on the name.
    pub name: Option<String>,
    /// Only products with stock at or below this level.
    pub max_stock: Option<i64>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        name: &str,
        price: Decimal,
        stock: i64,
    ) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(
            "INSERT INTO products (name, price, stock, created_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, name, price, stock, created_at",
        )
        .bind(name)
        .bind(price.to_string())
        .bind(stock)
        .bind(now_rfc3339())
        .fetch_one(self.pool)
        .await?;

        row.into_domain()
    }

    /// Resolve the given IDs to products. Missing IDs are silently absent
    /// from the result; callers compare counts to detect them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row fails to parse.
    pub async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = sqlx::QueryBuilder::new(
            "SELECT id, name, price, stock, created_at FROM products WHERE id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.as_i64());
        }
        builder.push(") ORDER BY id");

        let rows: Vec<ProductRow> = builder.build_query_as().fetch_all(self.pool).await?;
        rows.into_iter().map(ProductRow::into_domain).collect()
    }

    /// All products with stock strictly below the threshold, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row fails to parse.
    pub async fn list_low_stock(&self, threshold: i64) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id, name, price, stock, created_at FROM products \
             WHERE stock < ? ORDER BY id",
        )
        .bind(threshold)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_domain).collect()
    }

    /// Increment a product's stock and return the updated product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn restock(&self, id: ProductId, by: i64) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(
            "UPDATE products SET stock = stock + ? WHERE id = ? \
             RETURNING id, name, price, stock, created_at",
        )
        .bind(by)
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), ProductRow::into_domain)
    }

    /// List products matching the filter, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row fails to parse.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id, name, price, stock, created_at FROM products \
             WHERE (? IS NULL OR instr(name, ?) > 0) \
               AND (? IS NULL OR stock <= ?) \
             ORDER BY id",
        )
        .bind(&filter.name)
        .bind(&filter.name)
        .bind(filter.max_stock)
        .bind(filter.max_stock)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_domain).collect()
    }
}

/// Raw product row as stored.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: String,
    stock: i64,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_domain(self) -> Result<Product, RepositoryError> {
        let price = self.price.parse::<Decimal>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            price,
            stock: self.stock,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_pool;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal")
    }

    #[tokio::test]
    async fn insert_preserves_price_exactly() {
        let pool = setup_pool().await;
        let repo = ProductRepository::new(&pool);

        let product = repo
            .insert("Widget", dec("19.99"), 5)
            .await
            .expect("insert");
        assert_eq!(product.price, dec("19.99"));
        assert_eq!(product.stock, 5);

        let fetched = repo
            .get_by_ids(&[product.id])
            .await
            .expect("get")
            .pop()
            .expect("present");
        assert_eq!(fetched.price, dec("19.99"));
    }

    #[tokio::test]
    async fn get_by_ids_skips_missing() {
        let pool = setup_pool().await;
        let repo = ProductRepository::new(&pool);

        let a = repo.insert("A", dec("10.00"), 1).await.expect("insert");
        let missing = ProductId::new(9999);

        let found = repo.get_by_ids(&[a.id, missing]).await.expect("get");
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|p| p.id), Some(a.id));
    }

    #[tokio::test]
    async fn list_low_stock_is_strict() {
        let pool = setup_pool().await;
        let repo = ProductRepository::new(&pool);

        repo.insert("low", dec("1.00"), 3).await.expect("insert");
        repo.insert("edge", dec("1.00"), 10).await.expect("insert");
        repo.insert("high", dec("1.00"), 15).await.expect("insert");

        let low = repo.list_low_stock(10).await.expect("list");
        assert_eq!(low.len(), 1);
        assert_eq!(low.first().map(|p| p.stock), Some(3));
    }

    #[tokio::test]
    async fn restock_increments() {
        let pool = setup_pool().await;
        let repo = ProductRepository::new(&pool);

        let product = repo.insert("P", dec("2.50"), 9).await.expect("insert");
        let updated = repo.restock(product.id, 10).await.expect("restock");
        assert_eq!(updated.stock, 19);

        let err = repo
            .restock(ProductId::new(12345), 10)
            .await
            .expect_err("missing product");
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
