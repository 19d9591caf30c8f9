//! Test event logs — mock `EventLog` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use liveshop_core::error::DomainError;
use liveshop_core::event_log::EventLog;

/// An event log held in memory, keyed like the real one.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    lists: Mutex<HashMap<String, Vec<String>>>,
}

impl InMemoryEventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload raw entries under `key`. Entries are stored verbatim, so this
    /// is also how tests plant corrupt data.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_entries(self, key: &str, entries: Vec<String>) -> Self {
        self.lists.lock().unwrap().insert(key.to_owned(), entries);
        self
    }

    /// Returns a snapshot of the raw entries under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn entries(&self, key: &str) -> Vec<String> {
        self.lists
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn append(&self, key: &str, entry: String) -> Result<(), DomainError> {
        self.lists
            .lock()
            .unwrap()
            .entry(key.to_owned())
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn read_all(&self, key: &str) -> Result<Vec<String>, DomainError> {
        Ok(self.entries(key))
    }

    async fn read_last(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self
            .lists
            .lock()
            .unwrap()
            .get(key)
            .and_then(|list| list.last().cloned()))
    }
}

/// An event log that always returns a transport error.
#[derive(Debug)]
pub struct FailingEventLog;

#[async_trait]
impl EventLog for FailingEventLog {
    async fn append(&self, _key: &str, _entry: String) -> Result<(), DomainError> {
        Err(DomainError::Transport("connection refused".into()))
    }

    async fn read_all(&self, _key: &str) -> Result<Vec<String>, DomainError> {
        Err(DomainError::Transport("connection refused".into()))
    }

    async fn read_last(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Err(DomainError::Transport("connection refused".into()))
    }
}
