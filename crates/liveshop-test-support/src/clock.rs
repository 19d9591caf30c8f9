//! Pinned clock for tests.

use chrono::{DateTime, TimeZone, Utc};
use liveshop_core::clock::Clock;

/// Always answers with the wrapped instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to a UTC calendar time.
    ///
    /// # Panics
    ///
    /// Panics if the components do not form a valid date and time.
    #[must_use]
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
                .single()
                .expect("valid calendar time"),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
