//! Integration test harness for BrightDesk CRM.
//!
//! Builds the real application router over an in-memory SQLite database
//! and drives it request by request with `tower::ServiceExt::oneshot`, so
//! the tests exercise the full wire contract without a running server.

use std::str::FromStr;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use brightdesk_server::config::CrmConfig;
use brightdesk_server::state::AppState;

/// The application router plus a handle on its database.
pub struct TestContext {
    pub app: Router,
    pub pool: sqlx::SqlitePool,
}

impl TestContext {
    /// Build a fresh context with migrations applied.
    ///
    /// The pool is capped at one connection: each in-memory SQLite
    /// connection is a separate database, so a larger pool would scatter
    /// the schema across invisible siblings.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be set up; tests cannot proceed
    /// without it.
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("valid connection string")
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("in-memory database");

        brightdesk_server::db::run_migrations(&pool)
            .await
            .expect("migrations apply");

        let config = CrmConfig::from_env().expect("default configuration");
        let app = brightdesk_server::app(AppState::new(config, pool.clone()));

        Self { app, pool }
    }

    /// POST a JSON body and return the status with the parsed response.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the response is not JSON.
    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request built");
        self.send_expecting_json(request).await
    }

    /// GET a path and return the status with the parsed JSON response.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the response is not JSON.
    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request built");
        self.send_expecting_json(request).await
    }

    /// GET a path and return the status with the raw response body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body is not UTF-8.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request built");
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collected")
            .to_bytes();
        (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
    }

    async fn send_expecting_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collected")
            .to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }
}
