//! Routes for the Events bounded context.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;

use liveshop_core::error::DomainError;
use liveshop_core::model::EntityId;
use liveshop_events::application::query_handlers::{self, EventCountdownView};
use liveshop_events::domain::window::EventWindows;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /events
#[instrument(skip(state))]
async fn list_events(State(state): State<AppState>) -> Result<Json<EventWindows>, ApiError> {
    let windows =
        query_handlers::list_event_windows(state.clock.as_ref(), &*state.domain_store).await?;
    Ok(Json(windows))
}

/// GET /event/{event_id}
///
/// A non-numeric id is answered with the same JSON error body as every other
/// validation failure.
#[instrument(skip_all, fields(event_id))]
async fn get_event(
    State(state): State<AppState>,
    event_id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<EventCountdownView>, ApiError> {
    let Path(event_id) = event_id
        .map_err(|e| DomainError::Validation(format!("invalid event id: {}", e.body_text())))?;
    tracing::Span::current().record("event_id", event_id);

    let view =
        query_handlers::get_event_countdown(event_id, state.clock.as_ref(), &*state.domain_store)
            .await?;
    Ok(Json(view))
}

/// Returns the router for the events context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/event/{event_id}", get(get_event))
}
