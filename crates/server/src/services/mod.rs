//! Mutation services.
//!
//! Each service composes validation with store writes and returns a
//! soft-result object: validation failures are part of the result payload
//! (`message`, optional error list) and never surface as `Err`. Only
//! infrastructure failures (storage unavailable, corrupted rows) propagate
//! as [`RepositoryError`](crate::db::RepositoryError).

pub mod customers;
pub mod inventory;
pub mod orders;
pub mod products;

pub use customers::CustomerService;
pub use inventory::InventoryService;
pub use orders::OrderService;
pub use products::ProductService;
