//! Product mutation service: `createProduct`.

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::models::{CreateProductInput, CreateProductResult};

const MSG_CREATED: &str = "Product created successfully";
const MSG_BAD_PRICE: &str = "Price must be positive";
const MSG_BAD_STOCK: &str = "Stock cannot be negative";

/// Service for product mutations.
pub struct ProductService {
    pool: SqlitePool,
}

impl ProductService {
    /// Create a new product service.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a product.
    ///
    /// Price must be strictly positive and stock non-negative (default 0).
    /// There is no uniqueness constraint on the name: identical calls
    /// produce distinct records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only for storage failures.
    pub async fn create(
        &self,
        input: CreateProductInput,
    ) -> Result<CreateProductResult, RepositoryError> {
        if input.price <= Decimal::ZERO {
            return Ok(failure(MSG_BAD_PRICE));
        }

        let stock = input.stock.unwrap_or(0);
        if stock < 0 {
            return Ok(failure(MSG_BAD_STOCK));
        }

        let product = ProductRepository::new(&self.pool)
            .insert(&input.name, input.price, stock)
            .await?;

        info!(product_id = %product.id, "Created product");

        Ok(CreateProductResult {
            product: Some(product),
            message: MSG_CREATED.to_owned(),
        })
    }
}

fn failure(message: &str) -> CreateProductResult {
    CreateProductResult {
        product: None,
        message: message.to_owned(),
    }
}
