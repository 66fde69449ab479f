//! End-to-end tests for the customer mutations and queries.

use axum::http::StatusCode;
use serde_json::json;

use brightdesk_integration_tests::TestContext;

#[tokio::test]
async fn create_customer_returns_wire_contract_fields() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post_json(
            "/api/createCustomer",
            &json!({"name": "Alice", "email": "alice@example.com", "phone": "+14155550101"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer created successfully");
    let customer = &body["customer"];
    assert_eq!(customer["name"], "Alice");
    assert_eq!(customer["email"], "alice@example.com");
    assert_eq!(customer["phone"], "+14155550101");
    assert!(customer["id"].is_i64());
    assert!(customer["createdAt"].is_string());
}

#[tokio::test]
async fn duplicate_email_is_a_soft_failure() {
    let ctx = TestContext::new().await;
    let input = json!({"name": "Alice", "email": "alice@example.com"});

    let (status, _) = ctx.post_json("/api/createCustomer", &input).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = ctx.post_json("/api/createCustomer", &input).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Email already exists");
    assert!(body["customer"].is_null());
}

#[tokio::test]
async fn invalid_phone_is_rejected_with_message() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post_json(
            "/api/createCustomer",
            &json!({"name": "Bob", "email": "bob@example.com", "phone": "not-a-phone"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Invalid phone format");
    assert!(body["customer"].is_null());
}

#[tokio::test]
async fn bulk_create_reports_partial_success() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post_json(
            "/api/bulkCreateCustomers",
            &json!({"input": [
                {"name": "Alice", "email": "alice@example.com"},
                {"name": "Echo", "email": "alice@example.com"},
                {"name": "Bob", "email": "bob@example.com", "phone": "bad"},
                {"name": "Carol", "email": "carol@example.com"},
            ]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let customers = body["customers"].as_array().expect("customers array");
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0]["name"], "Alice");
    assert_eq!(customers[1]["name"], "Carol");

    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], "Row 2: Email already exists");
    assert_eq!(errors[1], "Row 3: Invalid phone format");
}

#[tokio::test]
async fn all_customers_filters_by_substring() {
    let ctx = TestContext::new().await;
    for (name, email) in [
        ("Alice Nolan", "alice@example.com"),
        ("Bob Tanaka", "bob@corp.test"),
    ] {
        let (status, _) = ctx
            .post_json("/api/createCustomer", &json!({"name": name, "email": email}))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = ctx.get_json("/api/allCustomers?name=Tanaka").await;
    assert_eq!(status, StatusCode::OK);
    let customers = body.as_array().expect("array");
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["email"], "bob@corp.test");

    let (status, body) = ctx.get_json("/api/allCustomers?email=example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 1);

    let (status, body) = ctx.get_json("/api/allCustomers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 2);
}
