//! Customer mutation services: `createCustomer` and `bulkCreateCustomers`.

use sqlx::SqlitePool;
use tracing::info;

use brightdesk_core::{Email, Phone};

use crate::db::customers::{CustomerRepository, NewCustomer};
use crate::db::RepositoryError;
use crate::models::{BulkCreateCustomersResult, CreateCustomerResult, CustomerInput};

const MSG_CREATED: &str = "Customer created successfully";
const MSG_REQUIRED: &str = "Name and email required";
const MSG_EMAIL_EXISTS: &str = "Email already exists";
const MSG_BAD_PHONE: &str = "Invalid phone format";

/// Service for customer mutations.
pub struct CustomerService {
    pool: SqlitePool,
}

/// Outcome of validating one customer input row.
enum RowValidation {
    Valid { email: Email, phone: Option<Phone> },
    Invalid(&'static str),
}

impl CustomerService {
    /// Create a new customer service.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a single customer.
    ///
    /// Check order is part of the contract: email uniqueness first, then
    /// phone format. Validation failures return a result carrying no
    /// customer and a message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only for storage failures.
    pub async fn create(
        &self,
        input: CustomerInput,
    ) -> Result<CreateCustomerResult, RepositoryError> {
        let repo = CustomerRepository::new(&self.pool);

        if input.name.is_empty() || input.email.is_empty() {
            return Ok(failure(MSG_REQUIRED));
        }

        if repo.email_exists(&input.email).await? {
            return Ok(failure(MSG_EMAIL_EXISTS));
        }

        let (email, phone) = match validate_row(&input) {
            RowValidation::Valid { email, phone } => (email, phone),
            RowValidation::Invalid(message) => return Ok(failure(message)),
        };

        let customer = match repo
            .insert(NewCustomer {
                name: &input.name,
                email: &email,
                phone: phone.as_ref(),
            })
            .await
        {
            Ok(customer) => customer,
            // Lost a race with a concurrent creation; same soft failure.
            Err(RepositoryError::Conflict(_)) => return Ok(failure(MSG_EMAIL_EXISTS)),
            Err(e) => return Err(e),
        };

        info!(customer_id = %customer.id, "Created customer");

        Ok(CreateCustomerResult {
            customer: Some(customer),
            message: MSG_CREATED.to_owned(),
        })
    }

    /// Create customers in bulk.
    ///
    /// Rows are processed independently: a validation failure records an
    /// indexed "Row N: ..." error and skips that row without aborting the
    /// batch. All validated rows are written inside one transaction, so an
    /// unexpected storage fault rolls the whole batch back, and uniqueness
    /// checks see rows created earlier in the same call.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only for storage failures.
    pub async fn bulk_create(
        &self,
        inputs: Vec<CustomerInput>,
    ) -> Result<BulkCreateCustomersResult, RepositoryError> {
        let repo = CustomerRepository::new(&self.pool);
        let mut tx = repo.begin().await?;

        let mut customers = Vec::new();
        let mut errors = Vec::new();

        for (idx, input) in inputs.iter().enumerate() {
            let row = idx + 1;

            if input.name.is_empty() || input.email.is_empty() {
                errors.push(format!("Row {row}: {MSG_REQUIRED}"));
                continue;
            }

            if repo.email_exists_in(&mut tx, &input.email).await? {
                errors.push(format!("Row {row}: {MSG_EMAIL_EXISTS}"));
                continue;
            }

            let (email, phone) = match validate_row(input) {
                RowValidation::Valid { email, phone } => (email, phone),
                RowValidation::Invalid(message) => {
                    errors.push(format!("Row {row}: {message}"));
                    continue;
                }
            };

            let customer = repo
                .insert_in(
                    &mut tx,
                    NewCustomer {
                        name: &input.name,
                        email: &email,
                        phone: phone.as_ref(),
                    },
                )
                .await?;
            customers.push(customer);
        }

        tx.commit().await?;

        info!(
            created = customers.len(),
            skipped = errors.len(),
            "Bulk customer creation finished"
        );

        Ok(BulkCreateCustomersResult { customers, errors })
    }
}

/// Shared shape validation for a customer row. Presence and uniqueness are
/// checked by the callers; this covers email length and phone format.
fn validate_row(input: &CustomerInput) -> RowValidation {
    let Ok(email) = Email::parse(&input.email) else {
        return RowValidation::Invalid(MSG_REQUIRED);
    };

    // An absent or empty phone is always valid; the field is optional.
    let phone = match input.phone.as_deref().filter(|p| !p.is_empty()) {
        Some(raw) => match Phone::parse(raw) {
            Ok(phone) => Some(phone),
            Err(_) => return RowValidation::Invalid(MSG_BAD_PHONE),
        },
        None => None,
    };

    RowValidation::Valid { email, phone }
}

fn failure(message: &str) -> CreateCustomerResult {
    CreateCustomerResult {
        customer: None,
        message: message.to_owned(),
    }
}
