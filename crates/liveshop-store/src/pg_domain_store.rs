//! `PostgreSQL` implementation of the `DomainStore` trait.

use async_trait::async_trait;
use chrono::TimeDelta;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use liveshop_core::error::DomainError;
use liveshop_core::model::{
    EntityId, Event, NewPurchase, Product, PurchaseEvent, PurchaseRecord, Timestamps, User,
};
use liveshop_core::store::DomainStore;

const EVENT_COLUMNS: &str = "id, created_at, updated_at, deleted_at, \
     title, start_date, duration_ns, image_url, influencer_id";

/// PostgreSQL-backed domain store.
#[derive(Debug, Clone)]
pub struct PgDomainStore {
    pool: PgPool,
}

impl PgDomainStore {
    /// Creates a new `PgDomainStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn transport(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::Transport(format!("{context}: {e}"))
}

fn timestamps_from_row(row: &PgRow) -> Result<Timestamps, sqlx::Error> {
    Ok(Timestamps {
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        deleted_at: row.try_get("deleted_at")?,
    })
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        timestamps: timestamps_from_row(row)?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        is_influencer: row.try_get("is_influencer")?,
    })
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        timestamps: timestamps_from_row(row)?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        category: row.try_get("category")?,
        image_url: row.try_get("image_url")?,
    })
}

fn event_from_row(row: &PgRow) -> Result<Event, sqlx::Error> {
    let duration_ns: i64 = row.try_get("duration_ns")?;
    Ok(Event {
        id: row.try_get("id")?,
        timestamps: timestamps_from_row(row)?,
        title: row.try_get("title")?,
        start_date: row.try_get("start_date")?,
        duration: TimeDelta::nanoseconds(duration_ns),
        image_url: row.try_get("image_url")?,
        influencer_id: row.try_get("influencer_id")?,
    })
}

fn purchase_from_row(row: &PgRow) -> Result<PurchaseRecord, sqlx::Error> {
    Ok(PurchaseRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        event_id: row.try_get("event_id")?,
        product_id: row.try_get("product_id")?,
        quantity: row.try_get("quantity")?,
        price: row.try_get("price")?,
        purchase_date: row.try_get("purchase_date")?,
    })
}

#[async_trait]
impl DomainStore for PgDomainStore {
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r"
            SELECT id, created_at, updated_at, deleted_at, email, name, is_influencer
            FROM users
            WHERE deleted_at IS NULL
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(transport("failed to load users"))?;

        rows.iter()
            .map(user_from_row)
            .collect::<Result<_, _>>()
            .map_err(transport("failed to decode user row"))
    }

    async fn list_events(&self) -> Result<Vec<Event>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(transport("failed to load events"))?;

        rows.iter()
            .map(event_from_row)
            .collect::<Result<_, _>>()
            .map_err(transport("failed to decode event row"))
    }

    async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        let rows = sqlx::query(
            r"
            SELECT id, created_at, updated_at, deleted_at, name, price, category, image_url
            FROM products
            WHERE deleted_at IS NULL
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(transport("failed to load products"))?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<_, _>>()
            .map_err(transport("failed to decode product row"))
    }

    async fn find_event(&self, event_id: EntityId) -> Result<Option<Event>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(transport("failed to load event"))?;

        row.as_ref()
            .map(event_from_row)
            .transpose()
            .map_err(transport("failed to decode event row"))
    }

    async fn insert_purchase(&self, purchase: NewPurchase) -> Result<PurchaseEvent, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO purchases
                (user_id, event_id, product_id, quantity, price, purchase_date,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6, $6)
            RETURNING id
            ",
        )
        .bind(purchase.user.id)
        .bind(purchase.event.id)
        .bind(purchase.product.id)
        .bind(purchase.quantity)
        .bind(purchase.price)
        .bind(purchase.purchase_date)
        .fetch_one(&self.pool)
        .await
        .map_err(transport("failed to insert purchase"))?;

        Ok(purchase.into_persisted(id))
    }

    async fn list_purchases(&self) -> Result<Vec<PurchaseRecord>, DomainError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, event_id, product_id, quantity, price, purchase_date
            FROM purchases
            WHERE deleted_at IS NULL
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(transport("failed to load purchases"))?;

        rows.iter()
            .map(purchase_from_row)
            .collect::<Result<_, _>>()
            .map_err(transport("failed to decode purchase row"))
    }
}
