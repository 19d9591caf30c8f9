//! Domain logic for the Events context.

pub mod window;
