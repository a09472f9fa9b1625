//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use axum::{middleware as axum_middleware, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::storage::SharedStorage;

pub use routes::create_router;

/// Build the application router with its middleware stack.
pub fn build_router(storage: SharedStorage) -> Router {
    // Axum layers run outermost-last: trace -> request id -> logging -> handler
    create_router()
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(storage)
}
