//! Integration tests for `PgDomainStore`.
//!
//! `#[sqlx::test]` creates a fresh database per test on the server named by
//! `DATABASE_URL`.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use liveshop_core::model::NewPurchase;
use liveshop_core::store::DomainStore;
use liveshop_store::PgDomainStore;
use liveshop_store::seed::seed_demo_data;
use sqlx::PgPool;

type RowStamps = (DateTime<Utc>, DateTime<Utc>, Option<DateTime<Utc>>);

// --- empty database ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_purchases_returns_empty_vec_for_fresh_database(pool: PgPool) {
    let store = PgDomainStore::new(pool);

    let purchases = store.list_purchases().await.unwrap();

    assert!(purchases.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_event_returns_none_for_unknown_id(pool: PgPool) {
    let store = PgDomainStore::new(pool);

    let event = store.find_event(9_999).await.unwrap();

    assert!(event.is_none());
}

// --- seeded catalog ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_seed_is_idempotent(pool: PgPool) {
    seed_demo_data(&pool).await.unwrap();
    seed_demo_data(&pool).await.unwrap();
    let store = PgDomainStore::new(pool);

    assert_eq!(store.list_users().await.unwrap().len(), 3);
    assert_eq!(store.list_products().await.unwrap().len(), 4);
    assert_eq!(store.list_events().await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_seeded_event_round_trips_duration(pool: PgPool) {
    seed_demo_data(&pool).await.unwrap();
    let store = PgDomainStore::new(pool);

    let events = store.list_events().await.unwrap();
    let summer = events.iter().find(|e| e.title == "Summer Sale").unwrap();

    assert_eq!(summer.duration, TimeDelta::hours(24));
    assert_eq!(
        summer.start_date,
        Utc.with_ymd_and_hms(2024, 8, 28, 0, 0, 0).unwrap()
    );

    let found = store.find_event(summer.id).await.unwrap();
    assert_eq!(found.as_ref(), Some(summer));
}

// --- purchases ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_purchase_assigns_id_and_is_listed(pool: PgPool) {
    seed_demo_data(&pool).await.unwrap();
    let store = PgDomainStore::new(pool);
    let user = store.list_users().await.unwrap().remove(1);
    let event = store.list_events().await.unwrap().remove(0);
    let product = store.list_products().await.unwrap().remove(2);
    let purchase_date = Utc.with_ymd_and_hms(2024, 8, 28, 12, 0, 0).unwrap();

    let persisted = store
        .insert_purchase(NewPurchase {
            user: user.clone(),
            event,
            price: product.price,
            product,
            quantity: 3,
            purchase_date,
        })
        .await
        .unwrap();

    assert!(persisted.id > 0);
    assert_eq!(persisted.user, user);

    let records = store.list_purchases().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, persisted.id);
    assert_eq!(records[0].quantity, 3);
    assert_eq!(records[0].purchase_date, purchase_date);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_inserted_purchase_is_stamped_with_purchase_date(pool: PgPool) {
    seed_demo_data(&pool).await.unwrap();
    let store = PgDomainStore::new(pool.clone());
    let user = store.list_users().await.unwrap().remove(0);
    let event = store.list_events().await.unwrap().remove(0);
    let product = store.list_products().await.unwrap().remove(0);
    let purchase_date = Utc.with_ymd_and_hms(2024, 8, 28, 12, 0, 0).unwrap();

    let persisted = store
        .insert_purchase(NewPurchase {
            user,
            event,
            price: product.price,
            product,
            quantity: 1,
            purchase_date,
        })
        .await
        .unwrap();

    let (created_at, updated_at, deleted_at): RowStamps =
        sqlx::query_as("SELECT created_at, updated_at, deleted_at FROM purchases WHERE id = $1")
            .bind(persisted.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(created_at, purchase_date);
    assert_eq!(updated_at, purchase_date);
    assert_eq!(deleted_at, None);
    assert_eq!(persisted.timestamps.created_at, purchase_date);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_seeded_catalog_carries_record_timestamps(pool: PgPool) {
    seed_demo_data(&pool).await.unwrap();
    let store = PgDomainStore::new(pool);

    let products = store.list_products().await.unwrap();

    assert!(products.iter().all(|p| p.timestamps.deleted_at.is_none()));
    assert!(
        products
            .iter()
            .all(|p| p.timestamps.updated_at >= p.timestamps.created_at)
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_soft_deleted_event_is_hidden(pool: PgPool) {
    seed_demo_data(&pool).await.unwrap();
    let store = PgDomainStore::new(pool.clone());
    let victim = store.list_events().await.unwrap().remove(0);

    sqlx::query("UPDATE events SET deleted_at = NOW() WHERE id = $1")
        .bind(victim.id)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(store.list_events().await.unwrap().len(), 2);
    assert!(store.find_event(victim.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_non_finite_price_is_refused_by_schema(pool: PgPool) {
    seed_demo_data(&pool).await.unwrap();
    let store = PgDomainStore::new(pool.clone());
    let product = store.list_products().await.unwrap().remove(0);

    let result = sqlx::query("UPDATE products SET price = 'Infinity' WHERE id = $1")
        .bind(product.id)
        .execute(&pool)
        .await;

    assert!(result.is_err());
}
