//! Startup failures and the JSON error responses returned by handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use liveshop_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Anything that stops the server from starting or serving.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The Postgres pool could not connect, or seeding failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis could not be reached at startup.
    #[error("event log error: {0}")]
    EventLog(String),

    /// The tracing subscriber or span exporter could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Binding the listener or serving failed.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable code, e.g. `not_found`.
    pub error: &'static str,
    /// The domain error rendered as text.
    pub message: String,
}

/// Handler error. Wraps a `DomainError` so `?` works in handlers.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

fn status_and_code(err: &DomainError) -> (StatusCode, &'static str) {
    match err {
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        DomainError::Transport(_) => (StatusCode::INTERNAL_SERVER_ERROR, "transport_error"),
        DomainError::Decode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "decode_error"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = status_and_code(&self.0);

        // 4xx are the caller's problem; only log what the operator must see.
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = ErrorBody {
            error,
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
