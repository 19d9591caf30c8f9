//! Liveshop Event Log — Redis list implementation of `EventLog`.

pub mod redis_event_log;

pub use redis_event_log::RedisEventLog;
