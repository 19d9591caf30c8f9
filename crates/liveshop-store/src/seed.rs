//! Demo catalog so a fresh database has something for the generator to pick.
//!
//! Every insert is idempotent; running the seed twice leaves one copy.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use sqlx::PgPool;

const USERS: [(&str, &str, bool); 3] = [
    ("alice@example.com", "Alice", true),
    ("bob@example.com", "Bob", false),
    ("charlie@example.com", "Charlie", true),
];

const PRODUCTS: [(&str, f64, &str, &str); 4] = [
    ("Cool T-shirt", 19.99, "Clothing", "/upload/product1.jpg"),
    ("Smartphone", 299.99, "Electronics", "/upload/product2.jpg"),
    ("Designer Handbag", 99.99, "Accessories", "/upload/product3.jpg"),
    ("Gaming Console", 499.99, "Electronics", "/upload/product4.jpg"),
];

/// (title, start date, duration in hours, image, influencer email)
const EVENTS: [(&str, (i32, u32, u32), i64, &str, &str); 3] = [
    ("Summer Sale", (2024, 8, 28), 24, "/upload/event1.jpg", "alice@example.com"),
    ("Back to School", (2024, 9, 1), 48, "/upload/event2.jpg", "charlie@example.com"),
    ("Black Friday", (2024, 11, 27), 72, "/upload/event3.jpg", "alice@example.com"),
];

/// (event title, product name, stock quantity)
const EVENT_PRODUCTS: [(&str, &str, i32); 8] = [
    ("Summer Sale", "Cool T-shirt", 100),
    ("Summer Sale", "Smartphone", 0),
    ("Back to School", "Designer Handbag", 50),
    ("Back to School", "Gaming Console", 0),
    ("Black Friday", "Cool T-shirt", 0),
    ("Black Friday", "Smartphone", 200),
    ("Black Friday", "Designer Handbag", 0),
    ("Black Friday", "Gaming Console", 0),
];

fn midnight_utc((year, month, day): (i32, u32, u32)) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Inserts the demo users, products, events and event/product links.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn seed_demo_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    for (email, name, is_influencer) in USERS {
        sqlx::query(
            "INSERT INTO users (email, name, is_influencer) VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(email)
        .bind(name)
        .bind(is_influencer)
        .execute(pool)
        .await?;
    }

    for (name, price, category, image_url) in PRODUCTS {
        sqlx::query(
            "INSERT INTO products (name, price, category, image_url) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(price)
        .bind(category)
        .bind(image_url)
        .execute(pool)
        .await?;
    }

    for (title, start, hours, image_url, influencer_email) in EVENTS {
        let Some(start_date) = midnight_utc(start) else {
            tracing::warn!(title, "skipping demo event with invalid start date");
            continue;
        };
        let duration_ns = TimeDelta::hours(hours).num_nanoseconds().unwrap_or(i64::MAX);

        sqlx::query(
            "INSERT INTO events (title, start_date, duration_ns, image_url, influencer_id) \
             SELECT $1, $2, $3, $4, id FROM users WHERE email = $5 \
             ON CONFLICT (title) DO NOTHING",
        )
        .bind(title)
        .bind(start_date)
        .bind(duration_ns)
        .bind(image_url)
        .bind(influencer_email)
        .execute(pool)
        .await?;
    }

    for (title, product_name, quantity) in EVENT_PRODUCTS {
        sqlx::query(
            "INSERT INTO event_products (event_id, product_id, quantity) \
             SELECT e.id, p.id, $3 FROM events e, products p \
             WHERE e.title = $1 AND p.name = $2 \
             ON CONFLICT (event_id, product_id) DO NOTHING",
        )
        .bind(title)
        .bind(product_name)
        .bind(quantity)
        .execute(pool)
        .await?;
    }

    tracing::info!("demo catalog seeded");
    Ok(())
}
