//! Database connection management

use anyhow::{Context, Result};
use chatdeck_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tokio::fs;
use tracing::info;

use crate::types::DatabaseResult;

/// Open the writer and reader pools for the configured database.
///
/// Both pools share one set of connect options: foreign keys enforced, WAL
/// journal, 5 second busy timeout. The writer pool holds exactly one
/// connection, so every mutation in the process is serialised through it.
pub async fn prepare_database(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    ensure_sqlite_path(&config.url).await?;

    let options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("invalid database url {}", config.url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let writer = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options.clone())
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    let reader = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open reader pool for {}", config.url))?;

    info!(url = %config.url, readers = config.max_connections, "database connection established");
    Ok(DatabaseConnection { reader, writer })
}

/// Ensure the directory holding the SQLite database file exists
async fn ensure_sqlite_path(url: &str) -> Result<()> {
    let Some(sqlite_path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let sqlite_path = sqlite_path.split('?').next().unwrap_or_default();
    if sqlite_path.is_empty() || sqlite_path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = Path::new(sqlite_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    Ok(())
}

/// Store handle passed to every repository and service.
///
/// Cloning is cheap; clones share the underlying pools.
#[derive(Clone, Debug)]
pub struct DatabaseConnection {
    reader: SqlitePool,
    writer: SqlitePool,
}

impl DatabaseConnection {
    /// Create a new database connection from configuration
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        prepare_database(config).await
    }

    /// Pool for read-only queries
    pub fn reader(&self) -> &SqlitePool {
        &self.reader
    }

    /// Pool for mutations
    pub fn writer(&self) -> &SqlitePool {
        &self.writer
    }

    /// Begin a write transaction. Dropping it without `commit` rolls back.
    pub async fn begin(&self) -> DatabaseResult<Transaction<'static, Sqlite>> {
        Ok(self.writer.begin().await?)
    }

    /// Close both pools
    pub async fn close(self) {
        self.reader.close().await;
        self.writer.close().await;
    }

    /// Test the database connection
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.reader)
            .await
            .context("failed to test database connection")?;
        Ok(())
    }
}
