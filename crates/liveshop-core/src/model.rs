//! Domain model shared by the store, the event log and the bounded contexts.
//!
//! Field names on the wire use the PascalCase convention (`ID`, `UserID`,
//! `ImageURL`, ...) that existing event log consumers read. Every stored
//! entity also carries `CreatedAt`, `UpdatedAt` and a nullable `DeletedAt`.
//! Association collections (`Purchases`, `Products`, `Influencer`, ...) are
//! never loaded into snapshots and are not written; they are ignored when
//! present on read.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate identifier assigned by the domain store.
pub type EntityId = i64;

/// Row bookkeeping shared by every stored entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Timestamps {
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker. Always `None` for rows the store returns.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Timestamps {
    /// A live row created and last written at `at`.
    #[must_use]
    pub fn at(at: DateTime<Utc>) -> Self {
        Self {
            created_at: at,
            updated_at: at,
            deleted_at: None,
        }
    }
}

/// A shopper or influencer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// Store-assigned identifier.
    #[serde(rename = "ID")]
    pub id: EntityId,
    /// Row bookkeeping.
    #[serde(flatten)]
    pub timestamps: Timestamps,
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Whether the user hosts events.
    pub is_influencer: bool,
}

/// A product that can be sold during events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    /// Store-assigned identifier.
    #[serde(rename = "ID")]
    pub id: EntityId,
    /// Row bookkeeping.
    #[serde(flatten)]
    pub timestamps: Timestamps,
    /// Product name, shown in notifications.
    pub name: String,
    /// Current unit price.
    pub price: f64,
    /// Free-form category label.
    pub category: String,
    /// Public URL of the product image.
    #[serde(rename = "ImageURL")]
    pub image_url: String,
}

/// A scheduled live-shopping session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    /// Store-assigned identifier.
    #[serde(rename = "ID")]
    pub id: EntityId,
    /// Row bookkeeping.
    #[serde(flatten)]
    pub timestamps: Timestamps,
    /// Event title.
    pub title: String,
    /// When the session starts.
    pub start_date: DateTime<Utc>,
    /// How long the session runs. Serialized as integer nanoseconds.
    #[serde(with = "duration_nanos")]
    pub duration: TimeDelta,
    /// Public URL of the event banner.
    #[serde(rename = "ImageURL")]
    pub image_url: String,
    /// The hosting user.
    #[serde(rename = "InfluencerID")]
    pub influencer_id: EntityId,
}

/// A purchase with denormalized snapshots of the user, event and product as
/// they were when the purchase was created. This is the event log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurchaseEvent {
    /// Store-assigned identifier.
    #[serde(rename = "ID")]
    pub id: EntityId,
    /// Row bookkeeping.
    #[serde(flatten)]
    pub timestamps: Timestamps,
    /// Buyer reference.
    #[serde(rename = "UserID")]
    pub user_id: EntityId,
    /// Buyer snapshot.
    pub user: User,
    /// Event reference.
    #[serde(rename = "EventID")]
    pub event_id: EntityId,
    /// Event snapshot.
    pub event: Event,
    /// Product reference.
    #[serde(rename = "ProductID")]
    pub product_id: EntityId,
    /// Product snapshot.
    pub product: Product,
    /// Number of units, at least one.
    pub quantity: i32,
    /// Unit price copied from the product at creation time.
    pub price: f64,
    /// When the purchase happened.
    pub purchase_date: DateTime<Utc>,
}

/// A purchase that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    /// Buyer snapshot.
    pub user: User,
    /// Event snapshot.
    pub event: Event,
    /// Product snapshot.
    pub product: Product,
    /// Number of units.
    pub quantity: i32,
    /// Unit price.
    pub price: f64,
    /// When the purchase happened.
    pub purchase_date: DateTime<Utc>,
}

impl NewPurchase {
    /// Attaches the store-assigned identifier. The row is stamped as
    /// created at `purchase_date`.
    #[must_use]
    pub fn into_persisted(self, id: EntityId) -> PurchaseEvent {
        PurchaseEvent {
            id,
            timestamps: Timestamps::at(self.purchase_date),
            user_id: self.user.id,
            user: self.user,
            event_id: self.event.id,
            event: self.event,
            product_id: self.product.id,
            product: self.product,
            quantity: self.quantity,
            price: self.price,
            purchase_date: self.purchase_date,
        }
    }
}

/// Flat purchase row as kept by the domain store.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    /// Store-assigned identifier.
    pub id: EntityId,
    /// Buyer reference.
    pub user_id: EntityId,
    /// Event reference.
    pub event_id: EntityId,
    /// Product reference.
    pub product_id: EntityId,
    /// Number of units.
    pub quantity: i32,
    /// Unit price at purchase time.
    pub price: f64,
    /// When the purchase happened.
    pub purchase_date: DateTime<Utc>,
}

impl From<&PurchaseEvent> for PurchaseRecord {
    fn from(purchase: &PurchaseEvent) -> Self {
        Self {
            id: purchase.id,
            user_id: purchase.user_id,
            event_id: purchase.event_id,
            product_id: purchase.product_id,
            quantity: purchase.quantity,
            price: purchase.price,
            purchase_date: purchase.purchase_date,
        }
    }
}

mod duration_nanos {
    use chrono::TimeDelta;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = value
            .num_nanoseconds()
            .ok_or_else(|| S::Error::custom("duration does not fit in i64 nanoseconds"))?;
        if nanos < 0 {
            return Err(S::Error::custom("duration must not be negative"));
        }
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let nanos = i64::deserialize(deserializer)?;
        if nanos < 0 {
            return Err(D::Error::custom("duration must not be negative"));
        }
        Ok(TimeDelta::nanoseconds(nanos))
    }
}
