//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;

use account_api::{api, MemoryStorage, PostgresStorage};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::util::ServiceExt;

/// Router over a fresh in-memory store. The store handle is returned too so
/// tests can inspect or seed it directly.
pub fn memory_app() -> (Router, MemoryStorage) {
    let storage = MemoryStorage::new();
    let app = api::build_router(Arc::new(storage.clone()));
    (app, storage)
}

/// Send one request through the router and decode the JSON response.
///
/// Non-JSON bodies decode to `Value::Null`.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Connect to `DATABASE_URL`, create the schema and empty the table
pub async fn setup_test_db() -> PostgresStorage {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    let storage = PostgresStorage::new(pool);
    storage.init().await.expect("Failed to create accounts table");

    sqlx::query("TRUNCATE TABLE accounts RESTART IDENTITY")
        .execute(storage.pool())
        .await
        .expect("Failed to clean up DB");

    storage
}
