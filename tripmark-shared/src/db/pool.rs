/// SQLite connection pool
///
/// Connections are opened with foreign keys enforced (SQLite defaults them
/// off), WAL journaling, and a busy timeout, which is what a multi-connection
/// web workload on SQLite wants. The pool is verified with a round-trip
/// query before it is handed out.
///
/// # Example
///
/// ```no_run
/// use tripmark_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = create_pool(DatabaseConfig {
///     url: "sqlite://instance/tripmark.db".to_string(),
///     ..Default::default()
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Pool settings, usually filled from environment configuration
///
/// Timeouts are in seconds so they can come straight from env vars.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. `sqlite://instance/tripmark.db`
    pub url: String,

    /// Upper bound on open connections
    ///
    /// SQLite allows many readers but a single writer, so a small pool
    /// is enough.
    pub max_connections: u32,

    /// Idle connections kept warm
    pub min_connections: u32,

    /// How long `acquire` waits before giving up (seconds)
    pub connect_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 30,
        }
    }
}

/// Opens a pool over the configured database and verifies it with a query
///
/// The database file is created if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the file cannot be opened or
/// created, or the verification query fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Opening database pool"
    );

    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect_with(options)
        .await?;

    health_check(&pool).await?;

    info!("Database pool ready");
    Ok(pool)
}

/// Round-trips a query to confirm the database answers
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let answer: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if answer.0 != 1 {
        return Err(sqlx::Error::Protocol(
            "health check query returned an unexpected value".into(),
        ));
    }

    debug!("Database health check passed");
    Ok(())
}

/// Closes the pool, flushing WAL checkpoints
///
/// Call this on shutdown; dropping the pool mid-write can leave the WAL
/// file behind.
pub async fn close_pool(pool: SqlitePool) {
    info!("Closing database pool");
    pool.close().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DatabaseConfig::default();

        assert_eq!(config.max_connections, 5);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_seconds, 30);
    }

    #[tokio::test]
    async fn test_pool_opens_and_answers_in_memory() {
        let pool = create_pool(DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        })
        .await
        .expect("pool should open");

        health_check(&pool).await.expect("health check should pass");
        close_pool(pool).await;
    }
}
