//! Liveshop Core — shared domain abstractions.
//!
//! This crate defines the model, the store traits and the determinism seams
//! (clock, RNG) that the bounded contexts depend on. It contains no
//! infrastructure code.

pub mod clock;
pub mod error;
pub mod event_log;
pub mod model;
pub mod rng;
pub mod store;
