//! Event log abstraction.

use async_trait::async_trait;

use crate::error::DomainError;

/// An ordered, append-only sequence of serialized entries under a shared key.
///
/// Entries are never mutated or removed. Ordering is insertion order.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Append one entry to the end of the sequence stored at `key`.
    async fn append(&self, key: &str, entry: String) -> Result<(), DomainError>;

    /// Read the whole sequence at `key`, oldest first.
    async fn read_all(&self, key: &str) -> Result<Vec<String>, DomainError>;

    /// Read the most recently appended entry at `key`, if any.
    async fn read_last(&self, key: &str) -> Result<Option<String>, DomainError>;
}
