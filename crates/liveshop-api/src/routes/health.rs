//! Liveness and readiness endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use liveshop_purchases::domain::codec::RECENT_PURCHASES_KEY;
use serde::Serialize;

use crate::state::AppState;

/// Liveness response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Per-dependency readiness.
#[derive(Serialize)]
pub struct ReadinessResponse {
    /// `ready` or `unavailable`.
    pub status: &'static str,
    /// `ok` or the error text from the domain store check.
    pub domain_store: String,
    /// `ok` or the error text from the event log check.
    pub event_log: String,
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/ready
///
/// Checks both stores with a cheap read.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let (store_check, log_check) = tokio::join!(
        state.domain_store.find_event(0),
        state.event_log.read_last(RECENT_PURCHASES_KEY),
    );

    let ready = store_check.is_ok() && log_check.is_ok();
    let describe = |err: Option<String>| err.unwrap_or_else(|| "ok".to_owned());

    let body = ReadinessResponse {
        status: if ready { "ready" } else { "unavailable" },
        domain_store: describe(store_check.err().map(|e| e.to_string())),
        event_log: describe(log_check.err().map(|e| e.to_string())),
    };
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(body))
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness))
}
