//! Seed the database with demo data for local work.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{info, warn};

use brightdesk_server::db::{CustomerRepository, NewCustomer, ProductRepository, RepositoryError};
use brightdesk_server::models::Customer;

const DEMO_CUSTOMERS: &[(&str, &str, Option<&str>)] = &[
    ("Alice Nolan", "alice@example.com", Some("+14155550101")),
    ("Bob Tanaka", "bob@example.com", Some("123-456-7890")),
    ("Carol Mensah", "carol@example.com", None),
];

const DEMO_PRODUCTS: &[(&str, &str, i64)] = &[
    ("Laptop Stand", "49.99", 4),
    ("Mechanical Keyboard", "129.00", 25),
    ("USB-C Hub", "39.50", 7),
    ("Monitor Arm", "89.00", 12),
];

/// Insert demo customers and products. Idempotent for customers (duplicate
/// emails are skipped); products are appended on every run.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a write fails for a
/// reason other than a duplicate email.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, pool) = super::connect().await?;
    brightdesk_server::db::run_migrations(&pool).await?;

    let customers = CustomerRepository::new(&pool);
    for (name, email, phone) in DEMO_CUSTOMERS {
        match seed_customer(&customers, name, email, *phone).await {
            Ok(customer) => info!(id = %customer.id, email, "Seeded customer"),
            Err(RepositoryError::Conflict(_)) => warn!(email, "Customer already seeded, skipping"),
            Err(e) => return Err(e.into()),
        }
    }

    let products = ProductRepository::new(&pool);
    for (name, price, stock) in DEMO_PRODUCTS {
        let price = Decimal::from_str(price)?;
        let product = products.insert(name, price, *stock).await?;
        info!(id = %product.id, name, "Seeded product");
    }

    info!("Seeding complete");
    Ok(())
}

async fn seed_customer(
    repo: &CustomerRepository<'_>,
    name: &str,
    email: &str,
    phone: Option<&str>,
) -> Result<Customer, RepositoryError> {
    let email = brightdesk_core::Email::parse(email)
        .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
    let phone = phone
        .map(brightdesk_core::Phone::parse)
        .transpose()
        .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

    repo.insert(NewCustomer {
        name,
        email: &email,
        phone: phone.as_ref(),
    })
    .await
}
