//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use liveshop_core::clock::SharedClock;
use liveshop_core::event_log::EventLog;
use liveshop_core::rng::DeterministicRng;
use liveshop_core::store::DomainStore;
use liveshop_purchases::application::generator::PurchaseGenerator;
use liveshop_test_support::{FixedClock, SequenceRng};
use tower::ServiceExt;

use liveshop_api::routes;
use liveshop_api::state::AppState;

/// Fixed timestamp used across all integration tests: six hours into the
/// second day of `sample_event`.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 29, 6, 0, 0).unwrap()
}

fn fixed_clock() -> SharedClock {
    Arc::new(FixedClock(fixed_now()))
}

/// Build the full app router over the given collaborators. Uses the same
/// route structure as `main.rs`.
pub fn build_test_app(domain_store: Arc<dyn DomainStore>, event_log: Arc<dyn EventLog>) -> Router {
    let app_state = AppState::new(fixed_clock(), domain_store, event_log);
    routes::router().with_state(app_state)
}

/// Build a generator over the same collaborators with a scripted RNG.
pub fn build_generator(
    domain_store: Arc<dyn DomainStore>,
    event_log: Arc<dyn EventLog>,
    rng: SequenceRng,
) -> PurchaseGenerator {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    PurchaseGenerator::new(domain_store, event_log, fixed_clock(), rng)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
