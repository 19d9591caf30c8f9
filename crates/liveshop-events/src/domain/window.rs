//! Event window classification.
//!
//! An event is `Live` once `now` has reached `start_date + duration` and
//! `Upcoming` before that, including while it is running. Consumers rely on
//! these labels as they are. There is no separate "ended" state.

use chrono::{DateTime, Utc};
use liveshop_core::model::Event;
use serde::Serialize;

/// Which list an event is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventWindow {
    /// `now` is at or past the end of the event.
    Live,
    /// The event has not ended yet.
    Upcoming,
}

/// Events split by window, each list in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventWindows {
    /// Events classified `Live`.
    pub live_events: Vec<Event>,
    /// Events classified `Upcoming`.
    pub upcoming_events: Vec<Event>,
}

/// End of the event's window, saturating at the latest representable time.
#[must_use]
pub fn event_end(event: &Event) -> DateTime<Utc> {
    event
        .start_date
        .checked_add_signed(event.duration)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Classifies one event. The boundary `now == end` is `Live`.
#[must_use]
pub fn classify(now: DateTime<Utc>, event: &Event) -> EventWindow {
    if now >= event_end(event) {
        EventWindow::Live
    } else {
        EventWindow::Upcoming
    }
}

/// Splits events into live and upcoming lists.
#[must_use]
pub fn partition(now: DateTime<Utc>, events: Vec<Event>) -> EventWindows {
    let (live_events, upcoming_events): (Vec<Event>, Vec<Event>) = events
        .into_iter()
        .partition(|event| classify(now, event) == EventWindow::Live);
    EventWindows {
        live_events,
        upcoming_events,
    }
}

/// Distance between `now` and the end of the event as
/// `"{h} hours, {m} minutes, {s} seconds"`.
///
/// The distance is absolute: before the end it counts down, after the end
/// it reports elapsed time in the same shape. Hours are not wrapped at 24.
#[must_use]
pub fn remaining_time(now: DateTime<Utc>, event: &Event) -> String {
    let gap = (event_end(event) - now).abs();
    let hours = gap.num_hours();
    let minutes = gap.num_minutes() % 60;
    let seconds = gap.num_seconds() % 60;
    format!("{hours} hours, {minutes} minutes, {seconds} seconds")
}
