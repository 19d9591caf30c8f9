//! Liveshop Store — PostgreSQL implementation of `DomainStore`.

pub mod pg_domain_store;
pub mod schema;
pub mod seed;

pub use pg_domain_store::PgDomainStore;
