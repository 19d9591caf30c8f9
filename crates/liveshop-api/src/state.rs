//! Shared application state.

use std::sync::Arc;

use liveshop_core::clock::SharedClock;
use liveshop_core::event_log::EventLog;
use liveshop_core::store::DomainStore;

/// Application state shared across all request handlers.
///
/// Handlers only read through these collaborators; the purchase generator
/// holds its own clones and is the only writer.
#[derive(Clone)]
pub struct AppState {
    /// Time source for event window classification.
    pub clock: SharedClock,
    /// Relational store of users, events, products and purchases.
    pub domain_store: Arc<dyn DomainStore>,
    /// Ordered log of serialized purchases.
    pub event_log: Arc<dyn EventLog>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: SharedClock,
        domain_store: Arc<dyn DomainStore>,
        event_log: Arc<dyn EventLog>,
    ) -> Self {
        Self {
            clock,
            domain_store,
            event_log,
        }
    }
}
