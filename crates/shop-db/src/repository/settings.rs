//! # Settings Repository
//!
//! String key-value settings with upsert semantics, plus typed accessors
//! for the seeded keys.
//!
//! ## Seeding
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Store::initialize                                           │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  INSERT OR IGNORE each default key                           │
//! │       │                                                      │
//! │       ├── key absent      → default written                  │
//! │       └── key present     → untouched (user customization    │
//! │                             always wins, even across         │
//! │                             repeated process starts)         │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;

/// Defaults written on first initialization. Values are stored as
/// strings; the typed accessors below parse them.
const DEFAULT_SETTINGS: &[(&str, &str)] = &[
    ("theme", "light"),
    ("language", "ar"),
    ("auto_backup", "true"),
    ("backup_frequency", "daily"),
    ("tax_rate", "15.0"),
    ("currency", "ريال"),
    ("low_stock_alert", "true"),
];

/// Fallback tax rate when the stored value is missing or unparseable.
const DEFAULT_TAX_RATE: f64 = 15.0;

/// Repository for application settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Seeds default settings for keys not already present. Never
    /// overwrites an existing value.
    pub async fn seed_defaults(&self) -> StoreResult<()> {
        let now = Utc::now();

        for &(key, value) in DEFAULT_SETTINGS {
            sqlx::query("INSERT OR IGNORE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)")
                .bind(key)
                .bind(value)
                .bind(now)
                .execute(&self.pool)
                .await?;
        }

        debug!("default settings seeded");
        Ok(())
    }

    /// Gets a setting value, or `default` when the key is absent.
    pub async fn get(&self, key: &str, default: &str) -> StoreResult<String> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value.unwrap_or_else(|| default.to_string()))
    }

    /// Upserts a setting value, always refreshing the update timestamp.
    pub async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(key, "writing setting");

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Typed accessors for the seeded keys
    // -------------------------------------------------------------------------

    /// Current UI theme.
    pub async fn theme(&self) -> StoreResult<String> {
        self.get("theme", "light").await
    }

    /// Current UI language code.
    pub async fn language(&self) -> StoreResult<String> {
        self.get("language", "ar").await
    }

    /// Display currency.
    pub async fn currency(&self) -> StoreResult<String> {
        self.get("currency", "ريال").await
    }

    /// Sales tax rate, as a percentage.
    pub async fn tax_rate(&self) -> StoreResult<f64> {
        let raw = self.get("tax_rate", "").await?;
        Ok(raw.parse().unwrap_or(DEFAULT_TAX_RATE))
    }

    /// Whether timed backups are enabled.
    pub async fn auto_backup(&self) -> StoreResult<bool> {
        Ok(self.get("auto_backup", "true").await? == "true")
    }

    /// Backup cadence label (`daily`, `weekly`, ...). Free-form; the
    /// scheduling itself is caller territory.
    pub async fn backup_frequency(&self) -> StoreResult<String> {
        self.get("backup_frequency", "daily").await
    }

    /// Whether the low-stock alert is shown.
    pub async fn low_stock_alert(&self) -> StoreResult<bool> {
        Ok(self.get("low_stock_alert", "true").await? == "true")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
