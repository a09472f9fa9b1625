//! API Middleware
//!
//! Request logging.

use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::error::LoggedError;

/// Header carrying the request id set by `tower_http::request_id`
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "proxy-authorization"];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                "[REDACTED]"
            } else {
                value.to_str().unwrap_or("[invalid utf8]")
            };
            (name.to_string(), value.to_string())
        })
        .collect()
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Log every request with its outcome and latency.
///
/// Failed responses carry a `LoggedError` extension with the message
/// returned to the client; it is logged at warn for 4xx and error for 5xx.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request_id(request.headers());

    tracing::debug!(
        method = %method,
        uri = %uri,
        request_id = ?request_id,
        headers = ?mask_headers_for_logging(request.headers()),
        "Incoming request"
    );

    let start = Instant::now();
    let response = next.run(request).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status();

    match response.extensions().get::<LoggedError>() {
        Some(LoggedError(error)) if status.is_server_error() => tracing::error!(
            method = %method,
            uri = %uri,
            status = %status,
            latency_ms = %latency_ms,
            request_id = ?request_id,
            error = %error,
            "Request failed"
        ),
        Some(LoggedError(error)) => tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status,
            latency_ms = %latency_ms,
            request_id = ?request_id,
            error = %error,
            "Request rejected"
        ),
        None => tracing::info!(
            method = %method,
            uri = %uri,
            status = %status,
            latency_ms = %latency_ms,
            request_id = ?request_id,
            "Request completed"
        ),
    }

    response
}
