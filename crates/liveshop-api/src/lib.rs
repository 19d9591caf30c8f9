//! Liveshop API — HTTP surface and process wiring for the purchase pipeline.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
