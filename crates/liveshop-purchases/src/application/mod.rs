//! Application services for the Purchases context.

pub mod generator;
pub mod query_handlers;
