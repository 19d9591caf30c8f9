//! Redis implementation of the `EventLog` trait.
//!
//! Each key is a Redis list. Appends are `RPUSH`, the full read is
//! `LRANGE key 0 -1` and the tail read is `LRANGE key -1 -1`.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};

use liveshop_core::error::DomainError;
use liveshop_core::event_log::EventLog;

/// Redis-backed event log.
#[derive(Clone)]
pub struct RedisEventLog {
    /// Connection manager for connection pooling and reconnects.
    conn_manager: ConnectionManager,
}

impl RedisEventLog {
    /// Connects to Redis.
    ///
    /// `timeout` bounds both connection establishment and every command's
    /// response time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Transport` if the URL is invalid or the initial
    /// connection fails.
    pub async fn connect(redis_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = Client::open(redis_url)
            .map_err(|e| DomainError::Transport(format!("failed to create Redis client: {e}")))?;

        let config = ConnectionManagerConfig::new()
            .set_connection_timeout(timeout)
            .set_response_timeout(timeout);

        let conn_manager = ConnectionManager::new_with_config(client, config)
            .await
            .map_err(|e| {
                DomainError::Transport(format!("failed to create Redis connection manager: {e}"))
            })?;

        tracing::info!("connected to Redis event log");

        Ok(Self { conn_manager })
    }
}

#[async_trait]
impl EventLog for RedisEventLog {
    async fn append(&self, key: &str, entry: String) -> Result<(), DomainError> {
        let mut conn = self.conn_manager.clone();

        let length: i64 = conn
            .rpush(key, entry)
            .await
            .map_err(|e| DomainError::Transport(format!("failed to append to {key}: {e}")))?;

        tracing::debug!(key, length, "appended event log entry");
        Ok(())
    }

    async fn read_all(&self, key: &str) -> Result<Vec<String>, DomainError> {
        let mut conn = self.conn_manager.clone();

        conn.lrange(key, 0, -1)
            .await
            .map_err(|e| DomainError::Transport(format!("failed to read {key}: {e}")))
    }

    async fn read_last(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.conn_manager.clone();

        let mut tail: Vec<String> = conn
            .lrange(key, -1, -1)
            .await
            .map_err(|e| DomainError::Transport(format!("failed to read tail of {key}: {e}")))?;

        Ok(tail.pop())
    }
}
