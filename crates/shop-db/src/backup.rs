//! # Backup Snapshots
//!
//! Timestamped snapshots of the store file, and purge of expired ones.
//!
//! ## Why `VACUUM INTO` instead of a file copy
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  The pool runs in WAL mode:                                  │
//! │                                                              │
//! │    shop.db        ← main file                                │
//! │    shop.db-wal    ← recent commits live HERE                 │
//! │                                                              │
//! │  A raw copy of shop.db alone silently drops everything       │
//! │  still in the WAL. VACUUM INTO writes one consistent,        │
//! │  self-contained snapshot through SQLite itself, under a      │
//! │  read transaction - ongoing reads are never blocked.         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backups are out-of-band operations: the caller triggers them manually
//! or on a timer and is responsible for not overlapping a backup with a
//! restore (restore = replace the store file while the pool is closed).

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::StoreResult;

/// Marker embedded in every snapshot filename; purge only ever touches
/// files carrying it.
const BACKUP_MARKER: &str = "_backup_";

/// Takes a snapshot of the live store into `backup_dir`.
///
/// The artifact is named `<stem>_backup_<YYYYMMDD_HHMMSS>.<ext>` after the
/// source file, e.g. `shop_backup_20260806_143000.db`.
pub async fn snapshot(
    pool: &SqlitePool,
    source: &Path,
    backup_dir: &Path,
) -> StoreResult<PathBuf> {
    // In-memory stores have no usable filename to derive the stem from.
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.starts_with(':'))
        .unwrap_or("store");
    let ext = source
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("db");

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let target = backup_dir.join(format!("{stem}{BACKUP_MARKER}{timestamp}.{ext}"));

    std::fs::create_dir_all(backup_dir)?;

    debug!(target = %target.display(), "taking backup snapshot");

    let target_str = target.display().to_string();
    sqlx::query("VACUUM INTO ?1")
        .bind(target_str)
        .execute(pool)
        .await?;

    info!(target = %target.display(), "backup complete");
    Ok(target)
}

/// Deletes snapshot files in `backup_dir` older than `keep_days`.
///
/// Only files carrying the backup marker are candidates; anything else in
/// the directory is left alone. Returns the number of files removed.
pub fn purge_old_backups(backup_dir: &Path, keep_days: u32) -> StoreResult<usize> {
    let cutoff = SystemTime::now() - Duration::from_secs(u64::from(keep_days) * 24 * 60 * 60);
    let mut removed = 0;

    for entry in std::fs::read_dir(backup_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let is_backup = name
            .to_str()
            .is_some_and(|n| n.contains(BACKUP_MARKER));
        if !is_backup {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        if modified < cutoff {
            debug!(file = %entry.path().display(), "purging expired backup");
            std::fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    if removed > 0 {
        info!(removed, keep_days, "purged expired backups");
    }
    Ok(removed)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use shop_core::NewProduct;

    #[tokio::test]
    async fn test_snapshot_naming_and_content() {
        let store = testing::store().await;
        let dir = tempfile::tempdir().unwrap();

        store
            .products()
            .insert(&NewProduct::new("Galaxy A16", 49_900))
            .await
            .unwrap();

        let path = snapshot(store.pool(), Path::new("data/shop.db"), dir.path())
            .await
            .unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("shop_backup_"));
        assert!(name.ends_with(".db"));

        // The snapshot is a complete, self-contained database.
        let size = std::fs::metadata(&path).unwrap().len();
        assert!(size > 0);
    }

    #[tokio::test]
    async fn test_purge_respects_cutoff_and_marker() {
        let dir = tempfile::tempdir().unwrap();

        let old = dir.path().join("shop_backup_20200101_000000.db");
        let unrelated = dir.path().join("notes.txt");
        std::fs::write(&old, b"stale").unwrap();
        std::fs::write(&unrelated, b"keep me").unwrap();

        // Age the backup file past the cutoff.
        let two_days_ago = SystemTime::now() - Duration::from_secs(2 * 24 * 60 * 60);
        let times = std::fs::FileTimes::new().set_modified(two_days_ago);
        std::fs::File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_times(times)
            .unwrap();

        let removed = purge_old_backups(dir.path(), 1).unwrap();

        assert_eq!(removed, 1);
        assert!(!old.exists());
        assert!(unrelated.exists());
    }

    #[tokio::test]
    async fn test_purge_keeps_recent_backups() {
        let dir = tempfile::tempdir().unwrap();

        let fresh = dir.path().join("shop_backup_20260806_120000.db");
        std::fs::write(&fresh, b"fresh").unwrap();

        let removed = purge_old_backups(dir.path(), 30).unwrap();

        assert_eq!(removed, 0);
        assert!(fresh.exists());
    }
}
