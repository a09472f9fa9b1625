//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::ValidationError;
use crate::storage::StorageError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Could not decode request: {0}")]
    InvalidRequest(String),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("ID is required")]
    MissingId,

    #[error("ID must be a number: {0}")]
    InvalidId(String),

    #[error("{0}")]
    InsufficientBalance(String),

    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    // Server errors (5xx)
    #[error("Could not {action}")]
    Storage {
        action: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Classify a storage failure raised while performing `action`.
    ///
    /// Missing accounts and rejected transfers become client errors;
    /// anything else is reported as a server error with `action` as the
    /// public message.
    pub fn from_storage(action: &'static str, err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => AppError::AccountNotFound(id),
            StorageError::InsufficientBalance { .. } | StorageError::BalanceOverflow(_) => {
                AppError::InsufficientBalance(err.to_string())
            }
            source @ StorageError::Database(_) => AppError::Storage { action, source },
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_)
            | AppError::Validation(_)
            | AppError::MissingId
            | AppError::InvalidId(_)
            | AppError::InsufficientBalance(_) => StatusCode::BAD_REQUEST,
            AppError::AccountNotFound(_) | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Storage { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

/// Error message attached to failed responses for the logging middleware
#[derive(Debug, Clone)]
pub struct LoggedError(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Causes stay in the logs; the client only sees the message
        match &self {
            AppError::Storage { action, source } => {
                tracing::error!("Could not {}: {:?}", action, source);
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
            }
            _ => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
        };

        let mut response = (status, Json(body)).into_response();
        response
            .extensions_mut()
            .insert(LoggedError(self.to_string()));
        response
    }
}
