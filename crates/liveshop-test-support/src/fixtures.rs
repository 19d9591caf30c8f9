//! Small builders for domain entities.

use chrono::{TimeDelta, TimeZone, Utc};
use liveshop_core::model::{EntityId, Event, Product, Timestamps, User};

// Catalog rows are stamped as created at 2024-08-01 09:00 UTC.
fn catalog_timestamps() -> Timestamps {
    Timestamps::at(Utc.with_ymd_and_hms(2024, 8, 1, 9, 0, 0).unwrap())
}

/// A non-influencer user named after its id.
#[must_use]
pub fn sample_user(id: EntityId) -> User {
    User {
        id,
        timestamps: catalog_timestamps(),
        email: format!("user{id}@example.com"),
        name: format!("User {id}"),
        is_influencer: false,
    }
}

/// A 24 hour event starting at 2024-08-28 00:00 UTC, hosted by user 1.
///
/// # Panics
///
/// Panics if chrono rejects the fixed start timestamp.
#[must_use]
pub fn sample_event(id: EntityId) -> Event {
    Event {
        id,
        timestamps: catalog_timestamps(),
        title: format!("Event {id}"),
        start_date: Utc.with_ymd_and_hms(2024, 8, 28, 0, 0, 0).unwrap(),
        duration: TimeDelta::hours(24),
        image_url: format!("/upload/event{id}.jpg"),
        influencer_id: 1,
    }
}

/// A product with the given name and price.
#[must_use]
pub fn sample_product(id: EntityId, name: &str, price: f64) -> Product {
    Product {
        id,
        timestamps: catalog_timestamps(),
        name: name.to_owned(),
        price,
        category: "Electronics".to_owned(),
        image_url: format!("/upload/product{id}.jpg"),
    }
}

/// An event log entry that is valid JSON but not a purchase: `ID` is a
/// string and every other field is missing.
#[must_use]
pub fn corrupt_entry() -> String {
    r#"{"ID":"seven","Quantity":2}"#.to_owned()
}
