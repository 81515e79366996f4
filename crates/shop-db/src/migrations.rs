//! # Store Migrations
//!
//! Embedded SQL migrations.
//!
//! ## How Migrations Work
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Store::new / Store::initialize                              │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  Compare embedded migrations vs _sqlx_migrations table       │
//! │       ├── 001_initial_schema.sql  ✓ applied                  │
//! │       └── 002_indexes.sql         ⬜ pending → run            │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  Record checksum + timestamp, continue startup               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Add `migrations/sqlite/NNN_description.sql` with the next number
//! 2. Write idempotent SQL (`IF NOT EXISTS` where possible)
//! 3. NEVER modify an applied migration - always add a new one

use sqlx::SqlitePool;
use tracing::info;

use crate::error::StoreResult;

/// Migrations embedded from `migrations/sqlite` at compile time; no
/// runtime file access needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending migrations, in filename order, each in its own
/// transaction. Idempotent.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    info!("checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("all migrations applied");
    Ok(())
}

/// Returns (total embedded, applied) migration counts, for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> StoreResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};

    #[tokio::test]
    async fn test_all_migrations_apply() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();

        let (total, applied) = migration_status(store.pool()).await.unwrap();
        assert_eq!(total, applied);

        // Running again must be a no-op.
        run_migrations(store.pool()).await.unwrap();
        let (_, applied_again) = migration_status(store.pool()).await.unwrap();
        assert_eq!(applied, applied_again);
    }
}
