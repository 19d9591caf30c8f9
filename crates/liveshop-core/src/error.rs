//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The domain store or the event log could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// A stored event log entry is not a valid serialized purchase.
    #[error("decode error: {0}")]
    Decode(String),

    /// The requested entity or log entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Preconditions for an operation were not met.
    #[error("validation error: {0}")]
    Validation(String),
}
