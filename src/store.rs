//! Single-file SQLite store: pool setup and resource table DDL.

use crate::config::ResolvedModel;
use crate::error::AppError;
use crate::sql::create_table;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const MAX_CONNECTIONS: u32 = 5;

/// Open the database file (created if missing) with WAL journaling so readers
/// do not block the single writer.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;
    tracing::info!(database_url = %database_url, "database opened");
    Ok(pool)
}

/// In-memory database on a single pinned connection; every pool checkout sees the same data.
pub async fn connect_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create one table per resource if absent. Existing tables are left untouched.
pub async fn ensure_resource_tables(pool: &SqlitePool, model: &ResolvedModel) -> Result<(), AppError> {
    for resource in &model.resources {
        let ddl = create_table(resource);
        tracing::debug!(sql = %ddl, "ensure table");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!(count = model.resources.len(), "resource tables ready");
    Ok(())
}

pub async fn ping(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").fetch_optional(pool).await?;
    Ok(())
}
