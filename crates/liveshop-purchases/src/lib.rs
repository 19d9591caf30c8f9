//! Liveshop — Purchases bounded context.
//!
//! Responsible for fabricating purchases on a fixed schedule, writing them
//! through to the domain store and the event log, and serving the read
//! paths over both: the full purchase feed, the latest-purchase
//! notification and the dashboard totals.

pub mod application;
pub mod domain;
