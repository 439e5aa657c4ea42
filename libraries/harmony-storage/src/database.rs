/// Database connection and migrations
use crate::error::{Result, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

// Embedded migrations, applied in order on every open
const MIGRATIONS: &[&str] = &[
    include_str!("../migrations/20250301000001_create_songs.sql"),
    include_str!("../migrations/20250301000002_create_playlists.sql"),
];

/// `SQLite` database for songs and playlists
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the database at `database_url` and run
    /// migrations
    ///
    /// # Errors
    /// Returns an error if the connection fails or migrations fail
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::run_migrations(&pool).await?;
        tracing::info!(url = %database_url, "database ready");

        Ok(Self { pool })
    }

    /// Create an in-memory database
    ///
    /// Every in-memory connection is its own database, so the pool is pinned
    /// to one connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Create database from an existing pool (migrations must already be applied)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        for migration in MIGRATIONS {
            sqlx::raw_sql(migration)
                .execute(pool)
                .await
                .map_err(|e| StorageError::Migration(e.to_string()))?;
        }
        Ok(())
    }
}
