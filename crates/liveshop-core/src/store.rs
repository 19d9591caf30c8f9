//! Domain store abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::model::{EntityId, Event, NewPurchase, Product, PurchaseEvent, PurchaseRecord, User};

/// Relational store holding users, events, products and purchases.
///
/// Implementations own their latency bounds (pool acquire timeouts and the
/// like); callers do not add their own.
#[async_trait]
pub trait DomainStore: Send + Sync {
    /// Load every user.
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    /// Load every event, ordered by identifier.
    async fn list_events(&self) -> Result<Vec<Event>, DomainError>;

    /// Load every product.
    async fn list_products(&self) -> Result<Vec<Product>, DomainError>;

    /// Load a single event, or `None` if it does not exist.
    async fn find_event(&self, event_id: EntityId) -> Result<Option<Event>, DomainError>;

    /// Persist a purchase and return it with its assigned identifier.
    async fn insert_purchase(&self, purchase: NewPurchase) -> Result<PurchaseEvent, DomainError>;

    /// Load every purchase row.
    async fn list_purchases(&self) -> Result<Vec<PurchaseRecord>, DomainError>;
}
