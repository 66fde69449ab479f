//! Customer repository for database operations.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use sqlx::{Sqlite, SqlitePool, Transaction};

use brightdesk_core::{CustomerId, Email, Phone};

use super::{RepositoryError, conflict_on_unique};
use crate::models::Customer;

const INSERT_SQL: &str = "INSERT INTO customers (name, email, phone, created_at) \
     VALUES (?, ?, ?, ?) \
     RETURNING id, name, email, phone, created_at";

const EXISTS_SQL: &str = "SELECT COUNT(*) FROM customers WHERE email = ?";

/// Filter criteria for listing customers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerFilter {
    /// Case-sensitive substring match on the name.
    pub name: Option<String>,
    /// Case-sensitive substring match on the email.
    pub email: Option<String>,
}

/// New customer data for insertion.
pub struct NewCustomer<'a> {
    pub name: &'a str,
    pub email: &'a Email,
    pub phone: Option<&'a Phone>,
}

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin a transaction for multi-row writes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction cannot start.
    pub async fn begin(&self) -> Result<Transaction<'a, Sqlite>, RepositoryError> {
        Ok(self.pool.begin().await?)
    }

    /// Whether any customer has this exact email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(EXISTS_SQL)
            .bind(email)
            .fetch_one(self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Like [`Self::email_exists`], but inside a transaction so the check
    /// sees rows written earlier in the same batch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn email_exists_in(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        email: &str,
    ) -> Result<bool, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(EXISTS_SQL)
            .bind(email)
            .fetch_one(&mut **tx)
            .await?;
        Ok(count > 0)
    }

    /// Persist a new customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, new: NewCustomer<'_>) -> Result<Customer, RepositoryError> {
        let row: CustomerRow = sqlx::query_as(INSERT_SQL)
            .bind(new.name)
            .bind(new.email.as_str())
            .bind(new.phone.map(Phone::as_str))
            .bind(now_rfc3339())
            .fetch_one(self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        row.into_domain()
    }

    /// Persist a new customer inside a transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert_in(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        new: NewCustomer<'_>,
    ) -> Result<Customer, RepositoryError> {
        let row: CustomerRow = sqlx::query_as(INSERT_SQL)
            .bind(new.name)
            .bind(new.email.as_str())
            .bind(new.phone.map(Phone::as_str))
            .bind(now_rfc3339())
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        row.into_domain()
    }

    /// Whether a customer with this ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers WHERE id = ?")
            .bind(id.as_i64())
            .fetch_one(self.pool)
            .await?;
        Ok(count > 0)
    }

    /// List customers matching the filter, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row fails to parse.
    pub async fn list(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, RepositoryError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            "SELECT id, name, email, phone, created_at FROM customers \
             WHERE (? IS NULL OR instr(name, ?) > 0) \
               AND (? IS NULL OR instr(email, ?) > 0) \
             ORDER BY id",
        )
        .bind(&filter.name)
        .bind(&filter.name)
        .bind(&filter.email)
        .bind(&filter.email)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CustomerRow::into_domain).collect()
    }

    /// Total number of customers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

/// Raw customer row as stored.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_domain(self) -> Result<Customer, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let phone = self
            .phone
            .as_deref()
            .map(Phone::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
            })?;

        Ok(Customer {
            id: CustomerId::new(self.id),
            name: self.name,
            email,
            phone,
            created_at: self.created_at,
        })
    }
}

pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_pool;

    #[tokio::test]
    async fn insert_and_email_exists() {
        let pool = setup_pool().await;
        let repo = CustomerRepository::new(&pool);

        let email = Email::parse("alice@example.com").expect("email");
        let customer = repo
            .insert(NewCustomer {
                name: "Alice",
                email: &email,
                phone: None,
            })
            .await
            .expect("insert");
        assert_eq!(customer.name, "Alice");
        assert!(customer.phone.is_none());

        assert!(repo.email_exists("alice@example.com").await.expect("exists"));
        assert!(!repo.email_exists("bob@example.com").await.expect("exists"));
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let pool = setup_pool().await;
        let repo = CustomerRepository::new(&pool);

        let email = Email::parse("carol@example.com").expect("email");
        repo.insert(NewCustomer {
            name: "Carol",
            email: &email,
            phone: None,
        })
        .await
        .expect("first insert");

        let err = repo
            .insert(NewCustomer {
                name: "Carol again",
                email: &email,
                phone: None,
            })
            .await
            .expect_err("duplicate insert");
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_filters_by_substring() {
        let pool = setup_pool().await;
        let repo = CustomerRepository::new(&pool);

        for (name, email) in [
            ("Alice", "alice@example.com"),
            ("Alicia", "alicia@other.org"),
            ("Bob", "bob@example.com"),
        ] {
            let email = Email::parse(email).expect("email");
            repo.insert(NewCustomer {
                name,
                email: &email,
                phone: None,
            })
            .await
            .expect("insert");
        }

        let by_name = repo
            .list(&CustomerFilter {
                name: Some("Alic".into()),
                email: None,
            })
            .await
            .expect("list");
        assert_eq!(by_name.len(), 2);

        let by_email = repo
            .list(&CustomerFilter {
                name: None,
                email: Some("example.com".into()),
            })
            .await
            .expect("list");
        assert_eq!(by_email.len(), 2);

        assert_eq!(repo.count().await.expect("count"), 3);
    }
}
