/// Database creation and schema migrations
///
/// Schema changes are numbered SQL files under `migrations/` at the
/// workspace root (e.g. `0001_create_users.sql`), compiled in via
/// `sqlx::migrate!` and applied on startup. [`ensure_database_exists`]
/// handles the step sqlx does not: creating the `instance/` directory on a
/// fresh checkout before the file-backed database can be opened.
///
/// # Example
///
/// ```no_run
/// use tripmark_shared::db::migrations::{ensure_database_exists, run_migrations};
/// use tripmark_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let url = "sqlite://instance/tripmark.db";
///
///     // Create the instance/ directory and database file on first run
///     ensure_database_exists(url).await?;
///
///     let pool = create_pool(DatabaseConfig {
///         url: url.to_string(),
///         ..Default::default()
///     })
///     .await?;
///
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Sqlite};
use std::path::Path;
use tracing::{debug, info, warn};

/// Applies every pending migration, in order
///
/// Already-applied migrations are skipped, so running this on every startup
/// is safe.
///
/// # Errors
///
/// Returns an error if a migration file is malformed or fails to execute.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Applying database migrations");

    // The path is relative to this crate's manifest
    let result = sqlx::migrate!("../migrations").run(pool).await;

    match &result {
        Ok(()) => info!("Database schema is up to date"),
        Err(e) => warn!("Migration run failed: {}", e),
    }

    result
}

/// Creates the database file if it doesn't exist
///
/// For file-backed databases the parent directory is created first, so a
/// fresh checkout can start against the default `instance/` path without any
/// manual setup. In-memory databases need no creation step.
///
/// # Errors
///
/// Returns an error if the directory or database file cannot be created
///
/// # Example
///
/// ```no_run
/// use tripmark_shared::db::migrations::ensure_database_exists;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// ensure_database_exists("sqlite://instance/tripmark.db").await?;
/// # Ok(())
/// # }
/// ```
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if let Some(file_path) = database_file_path(database_url) {
        if let Some(parent) = Path::new(file_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!(directory = %parent.display(), "Creating database directory");
                std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
            }
        }
    }

    if Sqlite::database_exists(database_url).await? {
        debug!("Database already exists");
    } else {
        info!(url = database_url, "Creating database");
        Sqlite::create_database(database_url).await?;
    }

    Ok(())
}

/// Extracts the filesystem path from a SQLite URL, or None for in-memory
/// databases.
fn database_file_path(database_url: &str) -> Option<&str> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);

    let path = match path.split_once('?') {
        Some((before, _)) => before,
        None => path,
    };

    if path.is_empty() || path.starts_with(':') {
        None
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_file_path_plain_file() {
        assert_eq!(
            database_file_path("sqlite://instance/tripmark.db"),
            Some("instance/tripmark.db")
        );
        assert_eq!(
            database_file_path("sqlite:instance/tripmark.db"),
            Some("instance/tripmark.db")
        );
    }

    #[test]
    fn test_database_file_path_strips_query() {
        assert_eq!(
            database_file_path("sqlite://tripmark.db?mode=rwc"),
            Some("tripmark.db")
        );
    }

    #[test]
    fn test_database_file_path_in_memory() {
        assert_eq!(database_file_path("sqlite::memory:"), None);
        assert_eq!(database_file_path("sqlite://"), None);
    }
}
