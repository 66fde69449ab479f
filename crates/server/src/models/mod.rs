//! Domain models and wire-contract input/result shapes.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::{BulkCreateCustomersResult, CreateCustomerResult, Customer, CustomerInput};
pub use order::{CreateOrderInput, CreateOrderResult, Order, OrderReminder};
pub use product::{CreateProductInput, CreateProductResult, Product, UpdateLowStockResult};
