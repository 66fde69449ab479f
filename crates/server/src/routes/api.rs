//! JSON API endpoints for the CRM mutations and queries.
//!
//! Mutations answer HTTP 200 for both outcomes of a domain rule check; the
//! result object's `message` (or `errors`) field carries the verdict. Only
//! storage faults become HTTP errors.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::db::{
    CustomerFilter, CustomerRepository, OrderFilter, OrderRepository, ProductFilter,
    ProductRepository,
};
use crate::error::AppError;
use crate::models::{
    BulkCreateCustomersResult, CreateCustomerResult, CreateOrderInput, CreateOrderResult,
    CreateProductInput, CreateProductResult, Customer, CustomerInput, Order, Product,
    UpdateLowStockResult,
};
use crate::services::{CustomerService, InventoryService, OrderService, ProductService};
use crate::state::AppState;

/// Heartbeat probe target.
///
/// GET /api/ping
pub async fn ping() -> &'static str {
    "pong"
}

/// Create one customer.
///
/// POST /api/createCustomer
///
/// # Errors
///
/// Returns `AppError::Database` if storage fails; rule violations come
/// back as a 200 with `customer: null` and an explanatory message.
pub async fn create_customer(
    State(state): State<AppState>,
    Json(input): Json<CustomerInput>,
) -> Result<Json<CreateCustomerResult>, AppError> {
    let result = CustomerService::new(state.pool().clone())
        .create(input)
        .await?;
    Ok(Json(result))
}

/// Request body for the bulk customer mutation.
#[derive(Debug, Deserialize)]
pub struct BulkCreateCustomersRequest {
    /// Rows to create, validated independently.
    pub input: Vec<CustomerInput>,
}

/// Create customers in bulk.
///
/// POST /api/bulkCreateCustomers
///
/// # Errors
///
/// Returns `AppError::Database` if storage fails; per-row rule violations
/// come back in the result's `errors` list.
pub async fn bulk_create_customers(
    State(state): State<AppState>,
    Json(request): Json<BulkCreateCustomersRequest>,
) -> Result<Json<BulkCreateCustomersResult>, AppError> {
    let result = CustomerService::new(state.pool().clone())
        .bulk_create(request.input)
        .await?;
    Ok(Json(result))
}

/// Create a product.
///
/// POST /api/createProduct
///
/// # Errors
///
/// Returns `AppError::Database` if storage fails.
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<Json<CreateProductResult>, AppError> {
    let result = ProductService::new(state.pool().clone())
        .create(input)
        .await?;
    Ok(Json(result))
}

/// Create an order with its product associations.
///
/// POST /api/createOrder
///
/// # Errors
///
/// Returns `AppError::Database` if storage fails.
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> Result<Json<CreateOrderResult>, AppError> {
    let result = OrderService::new(state.pool().clone()).create(input).await?;
    Ok(Json(result))
}

/// Restock all products under the low-stock threshold.
///
/// POST /api/updateLowStockProducts
///
/// The body is ignored; the operation takes no arguments. Failures are
/// absorbed into the result message, so this handler is infallible.
pub async fn update_low_stock_products(
    State(state): State<AppState>,
) -> Json<UpdateLowStockResult> {
    let result = InventoryService::new(state.pool().clone())
        .update_low_stock()
        .await;
    Json(result)
}

/// List customers, optionally filtered by name or email substring.
///
/// GET /api/allCustomers
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn all_customers(
    State(state): State<AppState>,
    Query(filter): Query<CustomerFilter>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = CustomerRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(customers))
}

/// List products, optionally filtered by name substring or stock ceiling.
///
/// GET /api/allProducts
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn all_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(products))
}

/// List orders, optionally filtered by a minimum order date.
///
/// GET /api/allOrders
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn all_orders(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(orders))
}
