//! Domain store schema.
//!
//! The DDL lives in the workspace `migrations/` directory and is embedded at
//! compile time.

use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};

/// Migrations for the users, products, events and purchases tables.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies any pending migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history
/// diverges from the embedded one.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("domain store migrations applied");
    Ok(())
}
