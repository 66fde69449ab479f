//! End-to-end tests for products, orders, restocking, and the probe
//! endpoints.

use axum::http::StatusCode;
use serde_json::{Value, json};

use brightdesk_integration_tests::TestContext;

async fn create_product(ctx: &TestContext, name: &str, price: &str, stock: i64) -> i64 {
    let (status, body) = ctx
        .post_json(
            "/api/createProduct",
            &json!({"name": name, "price": price, "stock": stock}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product created successfully");
    body["product"]["id"].as_i64().expect("product id")
}

async fn create_customer(ctx: &TestContext, email: &str) -> i64 {
    let (status, body) = ctx
        .post_json(
            "/api/createCustomer",
            &json!({"name": "Test Customer", "email": email}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body["customer"]["id"].as_i64().expect("customer id")
}

#[tokio::test]
async fn product_prices_survive_the_wire_exactly() {
    let ctx = TestContext::new().await;
    create_product(&ctx, "Widget", "19.99", 5).await;

    let (status, body) = ctx.get_json("/api/allProducts").await;
    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().expect("array");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["price"], "19.99");
    assert_eq!(products[0]["stock"], 5);
}

#[tokio::test]
async fn non_positive_price_is_a_soft_failure() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post_json("/api/createProduct", &json!({"name": "Freebie", "price": "0"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Price must be positive");
    assert!(body["product"].is_null());
}

#[tokio::test]
async fn create_order_totals_and_associates_products() {
    let ctx = TestContext::new().await;
    let customer_id = create_customer(&ctx, "orders@example.com").await;
    let widget = create_product(&ctx, "Widget", "10.00", 3).await;
    let gadget = create_product(&ctx, "Gadget", "15.00", 3).await;

    let (status, body) = ctx
        .post_json(
            "/api/createOrder",
            &json!({"customerId": customer_id, "productIds": [widget, gadget]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order created successfully");
    let order = &body["order"];
    assert_eq!(order["customerId"], customer_id);
    assert_eq!(order["totalAmount"], "25.00");
    let ids: Vec<i64> = order["productIds"]
        .as_array()
        .expect("product ids")
        .iter()
        .map(|v| v.as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![widget, gadget]);
}

#[tokio::test]
async fn create_order_rejects_unknown_customer_and_empty_products() {
    let ctx = TestContext::new().await;
    let customer_id = create_customer(&ctx, "empty@example.com").await;

    let (status, body) = ctx
        .post_json(
            "/api/createOrder",
            &json!({"customerId": 4242, "productIds": [1]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Invalid customer ID");
    assert!(body["order"].is_null());

    let (status, body) = ctx
        .post_json(
            "/api/createOrder",
            &json!({"customerId": customer_id, "productIds": []}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "At least one product must be selected");
}

#[tokio::test]
async fn update_low_stock_restocks_and_reports() {
    let ctx = TestContext::new().await;
    let scarce = create_product(&ctx, "Scarce", "1.00", 2).await;
    create_product(&ctx, "Plenty", "1.00", 50).await;

    let (status, body) = ctx
        .post_json("/api/updateLowStockProducts", &json!({}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully updated 1 low-stock products");
    assert_eq!(body["count"], 1);
    let updated = body["updatedProducts"].as_array().expect("array");
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0]["id"].as_i64(), Some(scarce));
    assert_eq!(updated[0]["stock"], 12);
}

#[tokio::test]
async fn all_orders_filters_by_minimum_date() {
    let ctx = TestContext::new().await;
    let customer_id = create_customer(&ctx, "dates@example.com").await;
    let widget = create_product(&ctx, "Widget", "5.00", 1).await;

    for date in ["2024-01-01T00:00:00Z", "2024-06-01T00:00:00Z"] {
        let (status, body) = ctx
            .post_json(
                "/api/createOrder",
                &json!({
                    "customerId": customer_id,
                    "productIds": [widget],
                    "orderDate": date,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Order created successfully");
    }

    let (status, body) = ctx
        .get_json("/api/allOrders?orderDateGte=2024-03-01T00:00:00Z")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 1);

    let (status, body) = ctx.get_json("/api/allOrders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn ping_answers_pong_and_health_is_ok() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get_text("/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "pong");

    let (status, body) = ctx.get_text("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _) = ctx.get_text("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post_json("/api/createProduct", &Value::String("not an object".into()))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.is_null());
}
