//! # Session Database
//!
//! Durable key/value storage for the session, kept in a small SQLite file so
//! the login survives restarts. Only the `token` key is used today; the table
//! is generic so more session state can be added without a new migration.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recipebox::client::session_db::SessionDb;
//! # async fn example() -> recipebox::shared::Result<()> {
//! let db = SessionDb::open(std::path::Path::new("/tmp/session.db")).await?;
//! db.set("token", "abc").await?;
//! assert_eq!(db.get("token").await?, Some("abc".to_string()));
//! # Ok(())
//! # }
//! ```

pub mod schema;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::shared::error::Result;
use schema::{
    get_pending_migrations, needs_migration, CREATE_SCHEMA_MIGRATIONS, CREATE_SESSION_KV,
};

/// Session database connection
#[derive(Debug, Clone)]
pub struct SessionDb {
    pool: SqlitePool,
}

impl SessionDb {
    /// Open or create the database at `path`
    ///
    /// Creates parent directories and the file if needed, then brings the
    /// schema up to date.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        // A single connection keeps writes ordered.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;
        tracing::debug!("Session database ready at {}", path.display());
        Ok(db)
    }

    /// Checks the current schema version and applies any pending migrations.
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(CREATE_SCHEMA_MIGRATIONS)
            .execute(&self.pool)
            .await?;

        let current_version =
            sqlx::query_scalar::<_, i32>("SELECT COALESCE(MAX(version), 0) FROM schema_migrations")
                .fetch_one(&self.pool)
                .await?;

        if !needs_migration(current_version) {
            return Ok(());
        }

        for version in get_pending_migrations(current_version) {
            if version == 1 {
                self.apply_migration_1().await?;
            }
            sqlx::query("INSERT INTO schema_migrations (version) VALUES (?)")
                .bind(version)
                .execute(&self.pool)
                .await?;
            tracing::debug!("Applied session schema migration {}", version);
        }

        Ok(())
    }

    /// Migration 1: key/value session table
    async fn apply_migration_1(&self) -> Result<()> {
        sqlx::query(CREATE_SESSION_KV).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM session_kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    /// Insert or overwrite `key`
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO session_kv (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Remove `key`; removing a missing key is not an error
    pub async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM session_kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Close the pool, flushing pending writes
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
