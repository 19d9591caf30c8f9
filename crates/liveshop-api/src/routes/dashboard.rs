//! Sales dashboard totals.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use tracing::instrument;

use liveshop_purchases::application::query_handlers::{self, DashboardTotals};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /dashboard-data
#[instrument(skip(state))]
async fn dashboard_data(State(state): State<AppState>) -> Result<Json<DashboardTotals>, ApiError> {
    let totals = query_handlers::dashboard_totals(&*state.domain_store).await?;
    Ok(Json(totals))
}

/// Returns the router for the dashboard.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard-data", get(dashboard_data))
}
