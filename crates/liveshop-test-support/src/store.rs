//! Test stores — mock `DomainStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use liveshop_core::error::DomainError;
use liveshop_core::model::{
    EntityId, Event, NewPurchase, Product, PurchaseEvent, PurchaseRecord, User,
};
use liveshop_core::store::DomainStore;

/// A domain store held in memory. Assigns purchase ids sequentially starting
/// at 1 and records every inserted purchase.
#[derive(Debug, Default)]
pub struct InMemoryDomainStore {
    users: Vec<User>,
    events: Vec<Event>,
    products: Vec<Product>,
    purchases: Mutex<Vec<PurchaseRecord>>,
    inserted: Mutex<Vec<PurchaseEvent>>,
}

impl InMemoryDomainStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the users.
    #[must_use]
    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    /// Replace the events.
    #[must_use]
    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    /// Replace the products.
    #[must_use]
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Preload purchase rows, as if written by an earlier process.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_purchases(self, records: Vec<PurchaseRecord>) -> Self {
        *self.purchases.lock().unwrap() = records;
        self
    }

    /// Returns a snapshot of every purchase inserted through the trait.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn inserted_purchases(&self) -> Vec<PurchaseEvent> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DomainStore for InMemoryDomainStore {
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.clone())
    }

    async fn list_events(&self) -> Result<Vec<Event>, DomainError> {
        Ok(self.events.clone())
    }

    async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.clone())
    }

    async fn find_event(&self, event_id: EntityId) -> Result<Option<Event>, DomainError> {
        Ok(self.events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn insert_purchase(&self, purchase: NewPurchase) -> Result<PurchaseEvent, DomainError> {
        let mut records = self.purchases.lock().unwrap();
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let persisted = purchase.into_persisted(next_id);
        records.push(PurchaseRecord::from(&persisted));
        self.inserted.lock().unwrap().push(persisted.clone());
        Ok(persisted)
    }

    async fn list_purchases(&self) -> Result<Vec<PurchaseRecord>, DomainError> {
        Ok(self.purchases.lock().unwrap().clone())
    }
}

/// A domain store that always returns a transport error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingDomainStore;

fn unreachable_store() -> DomainError {
    DomainError::Transport("connection refused".into())
}

#[async_trait]
impl DomainStore for FailingDomainStore {
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Err(unreachable_store())
    }

    async fn list_events(&self) -> Result<Vec<Event>, DomainError> {
        Err(unreachable_store())
    }

    async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        Err(unreachable_store())
    }

    async fn find_event(&self, _event_id: EntityId) -> Result<Option<Event>, DomainError> {
        Err(unreachable_store())
    }

    async fn insert_purchase(&self, _purchase: NewPurchase) -> Result<PurchaseEvent, DomainError> {
        Err(unreachable_store())
    }

    async fn list_purchases(&self) -> Result<Vec<PurchaseRecord>, DomainError> {
        Err(unreachable_store())
    }
}
