//! Application services for the Events context.

pub mod query_handlers;
