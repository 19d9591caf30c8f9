//! Time source for event windows and purchase timestamps.
//!
//! Everything that asks for the current time goes through [`Clock`] so that
//! tests can pin the answer.

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Something that can tell the current UTC time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock handle shared between request handlers and the purchase generator.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
