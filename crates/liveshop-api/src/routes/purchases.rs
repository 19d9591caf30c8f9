//! Routes for the Purchases bounded context.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use tracing::{debug, instrument};

use liveshop_core::model::PurchaseEvent;
use liveshop_purchases::application::query_handlers::{self, Notification};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /recent-purchases
#[instrument(skip(state))]
async fn recent_purchases(
    State(state): State<AppState>,
) -> Result<Json<Vec<PurchaseEvent>>, ApiError> {
    let purchases = query_handlers::recent_purchases(&*state.event_log).await?;
    debug!(count = purchases.len(), "read recent purchases");
    Ok(Json(purchases))
}

/// GET /latest-notification
#[instrument(skip(state))]
async fn latest_notification(
    State(state): State<AppState>,
) -> Result<Json<Notification>, ApiError> {
    let notification = query_handlers::latest_notification(&*state.event_log).await?;
    Ok(Json(notification))
}

/// Returns the router for the purchases context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recent-purchases", get(recent_purchases))
        .route("/latest-notification", get(latest_notification))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use liveshop_core::event_log::EventLog;
    use liveshop_core::model::NewPurchase;
    use liveshop_purchases::domain::codec::{RECENT_PURCHASES_KEY, encode_entry};
    use liveshop_test_support::{
        FailingEventLog, FixedClock, InMemoryDomainStore, InMemoryEventLog, corrupt_entry,
        sample_event, sample_product, sample_user,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_state_with(event_log: Arc<dyn EventLog>) -> AppState {
        AppState::new(
            Arc::new(FixedClock(Utc::now())),
            Arc::new(InMemoryDomainStore::new()),
            event_log,
        )
    }

    fn purchase_entry(id: i64, product_name: &str, quantity: i32) -> String {
        let purchase = NewPurchase {
            user: sample_user(1),
            event: sample_event(1),
            product: sample_product(id, product_name, 20.0),
            quantity,
            price: 20.0,
            purchase_date: Utc.with_ymd_and_hms(2024, 8, 28, 10, 0, 0).unwrap(),
        }
        .into_persisted(id);
        encode_entry(&purchase).unwrap()
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router().with_state(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_recent_purchases_returns_log_in_append_order() {
        // Arrange
        let log = InMemoryEventLog::new().with_entries(
            RECENT_PURCHASES_KEY,
            vec![purchase_entry(1, "Smartphone", 2), purchase_entry(2, "Laptop", 1)],
        );

        // Act
        let (status, json) = get(app_state_with(Arc::new(log)), "/recent-purchases").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        let purchases = json.as_array().unwrap();
        assert_eq!(purchases.len(), 2);
        assert_eq!(purchases[0]["ID"], 1);
        assert_eq!(purchases[0]["Product"]["Name"], "Smartphone");
        assert_eq!(purchases[1]["ID"], 2);
    }

    #[tokio::test]
    async fn test_recent_purchases_returns_empty_array_for_empty_log() {
        let (status, json) =
            get(app_state_with(Arc::new(InMemoryEventLog::new())), "/recent-purchases").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_recent_purchases_returns_500_for_corrupt_entry() {
        // Arrange
        let log = InMemoryEventLog::new().with_entries(
            RECENT_PURCHASES_KEY,
            vec![purchase_entry(1, "Smartphone", 2), corrupt_entry()],
        );

        // Act
        let (status, json) = get(app_state_with(Arc::new(log)), "/recent-purchases").await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "decode_error");
        assert!(json["message"].as_str().unwrap().contains("entry 1"));
    }

    #[tokio::test]
    async fn test_latest_notification_describes_tail_entry() {
        let log = InMemoryEventLog::new().with_entries(
            RECENT_PURCHASES_KEY,
            vec![purchase_entry(1, "Smartphone", 2), purchase_entry(2, "Laptop", 3)],
        );

        let (status, json) = get(app_state_with(Arc::new(log)), "/latest-notification").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "New purchase: 3 x Laptop");
    }

    #[tokio::test]
    async fn test_latest_notification_returns_404_for_empty_log() {
        let (status, json) = get(
            app_state_with(Arc::new(InMemoryEventLog::new())),
            "/latest-notification",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not_found");
    }

    #[tokio::test]
    async fn test_latest_notification_returns_500_when_log_fails() {
        let (status, json) =
            get(app_state_with(Arc::new(FailingEventLog)), "/latest-notification").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "transport_error");
    }
}
