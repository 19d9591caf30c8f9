//! Liveshop — Events bounded context.
//!
//! Classifies scheduled live-shopping events against the current time and
//! renders the countdown text shown on an event page.

pub mod application;
pub mod domain;
