//! Test harness for driving the full router against a real store.
//!
//! Each harness owns a private in-memory SQLite database with migrations
//! applied, so tests are isolated and need no external services. Requests
//! go through the real router via `tower::ServiceExt::oneshot`.

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use factory_core::server::build_app;

pub struct TestHarness {
    pub db_pool: SqlitePool,
    pub app: Router,
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        // A single pooled connection keeps the in-memory database alive
        // and shared for the lifetime of the harness.
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Failed to run migrations")?;

        let app = build_app(db_pool.clone());

        Ok(Self { db_pool, app })
    }

    /// Issue a request and return (status, parsed JSON body). Empty bodies
    /// come back as `Value::Null`.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        self.request("DELETE", path, None).await
    }

    /// Create a factory and return its id. Most machine/worker tests need
    /// one to reference.
    pub async fn create_factory(&self, name: &str, location: &str) -> i64 {
        let (status, body) = self
            .post(
                "/factories/",
                serde_json::json!({ "name": name, "location": location }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "factory setup failed: {body}");
        body["id"].as_i64().expect("factory id missing")
    }
}
