//! # Store Pool Management
//!
//! Connection pool creation and the [`Store`] handle.
//!
//! ## Lifecycle
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Application startup                                         │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  StoreConfig::new(path) ← pool sizing, backup dir            │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  Store::new(config).await ← create pool + initialize         │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  store.products() / store.sales() / ... per operation        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! The pool opens SQLite in WAL mode: readers never block the writer, and
//! the backup snapshot can run while reads continue.
//!
//! ## Single-writer discipline
//! The store is built for a single process issuing synchronous calls (the
//! original front-end drives it from one event thread). Nothing here
//! enforces cross-process coordination; if another process holds the file
//! exclusively, operations fail fast with a storage-unavailable error
//! after the short busy timeout instead of waiting indefinitely.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::backup;
use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::repository::customer::CustomerRepository;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::service::ServiceRepository;
use crate::repository::settings::SettingsRepository;
use crate::repository::supplier::SupplierRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("data/shop.db")
///     .backup_dir("backups")
///     .max_connections(5);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite store file.
    pub database_path: PathBuf,

    /// Directory receiving backup snapshots.
    /// Default: `backups` next to the store file.
    pub backup_dir: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (one writer plus concurrent readers).
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Timeout for acquiring a connection from the pool.
    /// Default: 30 seconds
    pub acquire_timeout: Duration,

    /// SQLite busy timeout. Kept short so an externally locked file fails
    /// fast instead of stalling the caller.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Whether to run migrations and seed defaults on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a configuration for the given store path. The file is
    /// created on first connect if absent.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let database_path: PathBuf = path.into();
        let backup_dir = database_path
            .parent()
            .map(|dir| dir.join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"));

        StoreConfig {
            database_path,
            backup_dir,
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Sets the backup directory.
    pub fn backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// In-memory stores need a single connection: every pooled connection
    /// would otherwise open its own private database.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            backup_dir: PathBuf::from("backups"),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(1),
            run_migrations: true,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == ":memory:"
    }
}

// =============================================================================
// Store
// =============================================================================

/// Main store handle providing repository access.
///
/// Cloning is cheap: all clones share one connection pool.
///
/// ## Usage
/// ```rust,ignore
/// let store = Store::new(StoreConfig::new("data/shop.db")).await?;
/// let id = store.products().insert(&NewProduct::new("Galaxy A16", 49_900)).await?;
/// let low = store.products().low_stock().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
    config: StoreConfig,
}

impl Store {
    /// Opens the store.
    ///
    /// ## What This Does
    /// 1. Creates the data and backup directories if missing
    /// 2. Configures SQLite: WAL journal, NORMAL synchronous, foreign
    ///    keys ON, short busy timeout
    /// 3. Creates the connection pool
    /// 4. Runs [`Store::initialize`] (unless disabled in the config)
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        info!(path = %config.database_path.display(), "opening store");

        if !config.is_in_memory() {
            if let Some(parent) = config.database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::create_dir_all(&config.backup_dir)?;
        }

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            // Readers don't block the writer and vice versa.
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // SQLite ships with foreign keys off for backwards
            // compatibility; the sale_items cascade depends on them.
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout)
            .create_if_missing(true);

        debug!("connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        info!(max_connections = config.max_connections, "store pool created");

        let store = Store { pool, config };

        if store.config.run_migrations {
            store.initialize().await?;
        }

        Ok(store)
    }

    /// Initializes the schema and seeds default settings.
    ///
    /// Idempotent and safe to call on every process start: applied
    /// migrations are skipped and seeding never overwrites a setting a
    /// user has already customized.
    pub async fn initialize(&self) -> StoreResult<()> {
        migrations::run_migrations(&self.pool).await?;
        self.settings().seed_defaults().await?;
        Ok(())
    }

    /// Returns a reference to the connection pool, for queries not covered
    /// by the repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    /// Returns the supplier repository.
    pub fn suppliers(&self) -> SupplierRepository {
        SupplierRepository::new(self.pool.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Returns the service repository.
    pub fn services(&self) -> ServiceRepository {
        ServiceRepository::new(self.pool.clone())
    }

    /// Returns the settings repository.
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }

    /// Takes a timestamped backup snapshot into the configured backup
    /// directory. Reads continue while the snapshot runs.
    pub async fn backup(&self) -> StoreResult<PathBuf> {
        backup::snapshot(&self.pool, &self.config.database_path, &self.config.backup_dir).await
    }

    /// Deletes backup artifacts older than `keep_days`. Returns how many
    /// files were removed.
    pub async fn purge_old_backups(&self, keep_days: u32) -> StoreResult<usize> {
        backup::purge_old_backups(&self.config.backup_dir, keep_days)
    }

    /// Checks if the store can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the connection pool. All repository operations fail
    /// afterwards.
    pub async fn close(&self) {
        info!("closing store pool");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();

        // Customize a seeded setting, then re-run initialization.
        store.settings().set("theme", "dark").await.unwrap();
        store.initialize().await.unwrap();
        store.initialize().await.unwrap();

        let theme = store.settings().get("theme", "light").await.unwrap();
        assert_eq!(theme, "dark");
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/tmp/shop.db")
            .backup_dir("/tmp/shop-backups")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.backup_dir, PathBuf::from("/tmp/shop-backups"));
    }

    #[test]
    fn test_default_backup_dir_is_sibling() {
        let config = StoreConfig::new("data/shop.db");
        assert_eq!(config.backup_dir, PathBuf::from("data/backups"));
    }
}
