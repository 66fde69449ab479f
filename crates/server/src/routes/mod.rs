//! HTTP route handlers for the CRM query surface.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (database ping)
//!
//! # Queries
//! GET  /api/ping                     - Heartbeat probe target, answers "pong"
//! GET  /api/allCustomers             - Customer list, filterable
//! GET  /api/allProducts              - Product list, filterable
//! GET  /api/allOrders                - Order list, filterable
//!
//! # Mutations
//! POST /api/createCustomer           - Create one customer
//! POST /api/bulkCreateCustomers      - Create customers in bulk
//! POST /api/createProduct            - Create a product
//! POST /api/createOrder              - Create an order with its products
//! POST /api/updateLowStockProducts   - Restock low-stock products
//! ```
//!
//! Operation and argument names are part of the wire contract; clients and
//! the heartbeat job depend on them verbatim.

pub mod api;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(api::ping))
        .route("/allCustomers", get(api::all_customers))
        .route("/allProducts", get(api::all_products))
        .route("/allOrders", get(api::all_orders))
        .route("/createCustomer", post(api::create_customer))
        .route("/bulkCreateCustomers", post(api::bulk_create_customers))
        .route("/createProduct", post(api::create_product))
        .route("/createOrder", post(api::create_order))
        .route("/updateLowStockProducts", post(api::update_low_stock_products))
}

/// Create the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
