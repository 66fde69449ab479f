//! Customer domain model and mutation shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brightdesk_core::{CustomerId, Email, Phone};

/// A CRM customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique customer ID (store-assigned).
    pub id: CustomerId,
    /// Customer display name.
    pub name: String,
    /// Email address, unique across all customers.
    pub email: Email,
    /// Optional phone number.
    pub phone: Option<Phone>,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a customer.
///
/// Also the per-row shape of `bulkCreateCustomers`. Fields arrive as raw
/// strings; presence and format are checked by the mutation service so that
/// failures surface as soft result messages, not deserialization errors.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerInput {
    /// Customer display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
}

/// Result of the `createCustomer` mutation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerResult {
    /// The created customer, absent on validation failure.
    pub customer: Option<Customer>,
    /// Human-readable outcome message.
    pub message: String,
}

/// Result of the `bulkCreateCustomers` mutation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateCustomersResult {
    /// Successfully created customers, in input order.
    pub customers: Vec<Customer>,
    /// Per-row error messages ("Row N: ..."), in input order.
    pub errors: Vec<String>,
}
