//! Shared test fakes and fixtures for the Liveshop purchase pipeline.

mod clock;
mod event_log;
mod fixtures;
mod rng;
mod store;

pub use clock::FixedClock;
pub use event_log::{FailingEventLog, InMemoryEventLog};
pub use fixtures::{corrupt_entry, sample_event, sample_product, sample_user};
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingDomainStore, InMemoryDomainStore};
