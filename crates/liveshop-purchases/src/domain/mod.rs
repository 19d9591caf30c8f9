//! Domain logic for the Purchases context.

pub mod codec;
pub mod selection;
