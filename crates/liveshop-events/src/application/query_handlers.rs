//! Query handlers for the Events context.

use liveshop_core::clock::Clock;
use liveshop_core::error::DomainError;
use liveshop_core::model::{EntityId, Event};
use liveshop_core::store::DomainStore;
use serde::Serialize;

use crate::domain::window::{self, EventWindow, EventWindows};

/// Read-only view of a single event page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventCountdownView {
    /// The event.
    pub event: Event,
    /// Its current window.
    pub window: EventWindow,
    /// Countdown (or elapsed) text relative to the event's end.
    pub remaining_time: String,
}

/// Loads every event and splits it into live and upcoming lists.
///
/// # Errors
///
/// Returns `DomainError::Transport` if the store cannot be read.
pub async fn list_event_windows(
    clock: &dyn Clock,
    store: &dyn DomainStore,
) -> Result<EventWindows, DomainError> {
    let events = store.list_events().await?;
    Ok(window::partition(clock.now(), events))
}

/// Loads one event and computes its window and countdown text.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no event has `event_id`.
/// Returns `DomainError::Transport` if the store cannot be read.
pub async fn get_event_countdown(
    event_id: EntityId,
    clock: &dyn Clock,
    store: &dyn DomainStore,
) -> Result<EventCountdownView, DomainError> {
    let event = store
        .find_event(event_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("event {event_id}")))?;

    let now = clock.now();
    let remaining_time = window::remaining_time(now, &event);
    tracing::debug!(event_id, %remaining_time, "computed event countdown");

    Ok(EventCountdownView {
        window: window::classify(now, &event),
        remaining_time,
        event,
    })
}
