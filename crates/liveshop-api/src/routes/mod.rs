//! Route modules organized by bounded context.

use axum::Router;

use crate::state::AppState;

pub mod dashboard;
pub mod events;
pub mod health;
pub mod purchases;

/// Every route the server exposes, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(dashboard::router())
        .merge(purchases::router())
        .merge(events::router())
}
