//! Inventory mutation service: `updateLowStockProducts`.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::models::{Product, UpdateLowStockResult};

/// Products with stock strictly below this level are candidates.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// How many units each candidate gains per run.
pub const RESTOCK_AMOUNT: i64 = 10;

/// Service for the low-stock replenishment mutation.
pub struct InventoryService {
    pool: SqlitePool,
}

impl InventoryService {
    /// Create a new inventory service.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Restock every product with stock below [`LOW_STOCK_THRESHOLD`] by
    /// [`RESTOCK_AMOUNT`] units.
    ///
    /// This method never fails past its boundary: any storage failure is
    /// converted into a result with an empty product list, a count of 0,
    /// and a message embedding the failure detail. Every invocation that
    /// finds candidates mutates store state; there is no dry-run mode.
    pub async fn update_low_stock(&self) -> UpdateLowStockResult {
        match self.try_update().await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Low stock update failed");
                UpdateLowStockResult {
                    updated_products: Vec::new(),
                    message: format!("Low stock update failed: {e}"),
                    count: 0,
                }
            }
        }
    }

    async fn try_update(&self) -> Result<UpdateLowStockResult, RepositoryError> {
        let repo = ProductRepository::new(&self.pool);
        let candidates = repo.list_low_stock(LOW_STOCK_THRESHOLD).await?;

        let mut updated: Vec<Product> = Vec::with_capacity(candidates.len());
        for product in &candidates {
            updated.push(repo.restock(product.id, RESTOCK_AMOUNT).await?);
        }

        let count = updated.len();
        let message = if count == 0 {
            "No products required restocking".to_owned()
        } else {
            format!("Successfully updated {count} low-stock products")
        };

        info!(count, "Low stock update completed");

        Ok(UpdateLowStockResult {
            updated_products: updated,
            message,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_pool;

    async fn seed_product(pool: &SqlitePool, name: &str, stock: i64) {
        ProductRepository::new(pool)
            .insert(name, "1.00".parse().expect("decimal"), stock)
            .await
            .expect("insert product");
    }

    #[tokio::test]
    async fn updates_only_below_threshold() {
        let pool = setup_pool().await;
        seed_product(&pool, "low", 3).await;
        seed_product(&pool, "high", 15).await;
        seed_product(&pool, "edge", 9).await;

        let service = InventoryService::new(pool.clone());
        let result = service.update_low_stock().await;

        assert_eq!(result.count, 2);
        assert_eq!(result.message, "Successfully updated 2 low-stock products");
        let stocks: Vec<i64> = result.updated_products.iter().map(|p| p.stock).collect();
        assert_eq!(stocks, vec![13, 19]);

        // The in-range product is untouched.
        let untouched = ProductRepository::new(&pool)
            .list(&crate::db::ProductFilter::default())
            .await
            .expect("list");
        assert!(untouched.iter().any(|p| p.name == "high" && p.stock == 15));
    }

    #[tokio::test]
    async fn reports_when_nothing_to_do() {
        let pool = setup_pool().await;
        seed_product(&pool, "plenty", 50).await;

        let service = InventoryService::new(pool);
        let result = service.update_low_stock().await;

        assert_eq!(result.count, 0);
        assert!(result.updated_products.is_empty());
        assert_eq!(result.message, "No products required restocking");
    }

    #[tokio::test]
    async fn converts_storage_failure_into_message() {
        let pool = setup_pool().await;
        // Make the scan fail.
        sqlx::query("DROP TABLE products")
            .execute(&pool)
            .await
            .expect("drop table");

        let service = InventoryService::new(pool);
        let result = service.update_low_stock().await;

        assert_eq!(result.count, 0);
        assert!(result.updated_products.is_empty());
        assert!(result.message.starts_with("Low stock update failed:"));
    }
}
